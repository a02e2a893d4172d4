use tracing::debug;

use crate::llm::{CompletionClient, LlmError};

pub const NO_ABSTRACT: &str = "No abstract available.";

fn summary_prompt(abstract_text: &str) -> String {
    format!("Summarize:\n{abstract_text}")
}

/// Summarize one abstract. A blank abstract yields [`NO_ABSTRACT`] without
/// contacting the model.
pub async fn summarize(
    llm: &impl CompletionClient,
    abstract_text: &str,
) -> Result<String, LlmError> {
    if abstract_text.trim().is_empty() {
        debug!("no abstract, skipping model call");
        return Ok(NO_ABSTRACT.to_string());
    }
    llm.complete(&summary_prompt(abstract_text)).await
}
