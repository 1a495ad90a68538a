//! Prompt building for XiaoliuRen readings.
//!
//! A reading is driven by the result palace, one of Da An, Liu Lian, Su Xi,
//! Chi Kou, Xiao Ji or Kong Wang, together with the question being asked and
//! the lunar date and shichen (two-hour period) it was cast for.

use std::fmt;

use serde::Deserialize;

use crate::llm::Message;

const SYSTEM_PROMPT: &[&str] = &[
    "You are a helpful assistant for XiaoliuRen readings.",
    "Respond in Simplified Chinese.",
    "Keep it concise and practical; avoid extreme claims.",
    "Use the result palace as the primary signal and tie it to the question.",
    "If the question is missing or vague, ask for clarification briefly.",
];

/// Body of an advice request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub palace: String,
    #[serde(default)]
    pub lunar_month: Option<LooseValue>,
    #[serde(default)]
    pub lunar_day: Option<LooseValue>,
    /// 1 = Zi ... 12 = Hai
    #[serde(default)]
    pub shichen: Option<LooseValue>,
}

impl AdviceRequest {
    /// A reading needs at least a question and a palace.
    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.palace.is_empty()
    }
}

/// A field clients send either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for LooseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseValue::Text(s) => f.write_str(s),
            LooseValue::Number(n) => write!(f, "{n}"),
        }
    }
}

fn display(value: &Option<LooseValue>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Build the system and user messages for a reading.
pub fn build_messages(request: &AdviceRequest) -> Vec<Message> {
    let question = if request.question.is_empty() {
        "(empty)"
    } else {
        request.question.as_str()
    };

    let user = [
        format!("Question: {question}"),
        format!("Result palace: {}", request.palace),
        format!(
            "Lunar month/day: {}/{}",
            display(&request.lunar_month),
            display(&request.lunar_day)
        ),
        format!(
            "Shichen index: {} (1=Zi ... 12=Hai)",
            display(&request.shichen)
        ),
        "Reference meanings (optional):".to_string(),
        "Da An=stability; Liu Lian=delay; Su Xi=good news; Chi Kou=dispute;".to_string(),
        "Xiao Ji=small fortune; Kong Wang=uncertainty/empty.".to_string(),
        "Provide a short reading and 2-4 actionable suggestions.".to_string(),
    ]
    .join("\n");

    vec![Message::system(SYSTEM_PROMPT.join(" ")), Message::user(user)]
}
