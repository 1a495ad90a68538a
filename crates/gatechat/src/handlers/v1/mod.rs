//! V1 API handlers.

mod advice;
mod chat;

#[cfg(test)]
mod test_support;

pub use advice::advice;
pub use chat::chat;
