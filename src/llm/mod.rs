//! Chat-completion client shared by the summarizer and the question answerer.

pub mod client;
pub mod types;

pub use client::{CompletionClient, LlmError, OpenAiClient};
