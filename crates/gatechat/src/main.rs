//! Gatechat CLI.
//!
//! Environment Variables:
//!     GATEWAY_API_KEY: gateway API key (the variable name is configurable)
//!     GATECHAT_CONFIG: path to the YAML config file (default: gatechat.yaml)
//!     RUST_LOG: log filter (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing_subscriber::EnvFilter;

use gatechat::config::Config;
use gatechat::llm::{GatewayClient, LLMProvider, Message};
use gatechat::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "gatechat", version)]
#[command(about = "Chat completion client for a model-serving gateway")]
#[command(after_help = r#"Examples:
    # One-shot question
    gatechat send --message "hello"

    # Full conversation from a JSON file
    gatechat send --file conversation.json

    # Conversation on stdin, print "[]" instead of failing
    echo '[{"role":"user","content":"hello"}]' | gatechat send --sentinel

    # Run the relay server
    gatechat serve --port 3000
"#)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = "GATECHAT_CONFIG", default_value = "gatechat.yaml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a conversation and print the reply
    Send(SendArgs),
    /// Run the HTTP relay server
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Read the conversation (JSON array of {role, content}) from a file
    #[arg(short, long, conflicts_with = "message")]
    file: Option<PathBuf>,

    /// Send a single user message instead of a JSON conversation
    #[arg(short, long)]
    message: Option<String>,

    /// System message to prepend to --message
    #[arg(long, requires = "message")]
    system: Option<String>,

    /// Print "[]" and exit successfully when the call fails
    #[arg(long)]
    sentinel: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let api_key = config.gateway.api_key()?;
    let client = GatewayClient::from_config(&config.gateway, config.generation.clone(), api_key)
        .context("building gateway client")?;

    match cli.command {
        Command::Send(args) => {
            let messages = read_messages(&args, tokio::io::stdin()).await?;
            println!("{}", run_send(&client, messages, args.sentinel).await?);
        }
        Command::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            let state = AppState {
                provider: Arc::new(client),
            };
            server::run(&config.server, state).await?;
        }
    }

    Ok(())
}

/// Send the conversation. Without `sentinel`, a failed call is an error (non-zero exit).
async fn run_send(
    provider: &dyn LLMProvider,
    messages: Vec<Message>,
    sentinel: bool,
) -> Result<String> {
    if sentinel {
        Ok(provider.send(messages).await)
    } else {
        Ok(provider.chat(messages).await?)
    }
}

/// Build the conversation from `--message`, `--file`, or `stdin`, in that order.
async fn read_messages<R>(args: &SendArgs, mut stdin: R) -> Result<Vec<Message>>
where
    R: AsyncRead + Unpin,
{
    if let Some(ref text) = args.message {
        let mut messages = Vec::new();
        if let Some(ref system) = args.system {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(text.clone()));
        return Ok(messages);
    }

    let raw = match args.file {
        Some(ref path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf).await?;
            buf
        }
    };

    let messages: Vec<Message> =
        serde_json::from_str(&raw).context("parsing conversation JSON")?;
    if messages.is_empty() {
        bail!("conversation is empty");
    }
    Ok(messages)
}
