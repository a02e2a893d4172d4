//! Fetch pipeline: gather papers from both sources, summarize, translate,
//! and answer questions over the resulting summaries.

pub(crate) mod pipeline;
pub(crate) mod qa;
pub(crate) mod summarize;
#[cfg(test)]
pub(crate) mod testing;

pub use pipeline::{gather, summarize_all};
pub use qa::{ask, build_context};
#[cfg(test)]
pub use summarize::NO_ABSTRACT;

use crate::llm::LlmError;
use crate::sources::SourceError;
use crate::translate::TranslateError;

#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Translate(#[from] TranslateError),
}
