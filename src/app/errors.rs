use crate::export::ExportError;
use crate::llm::LlmError;
use crate::research::ResearchError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please enter a research topic.")]
    EmptyTopic,

    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("No papers yet. Fetch a topic first.")]
    NoSession,

    #[error("limit must be a number from 1 to 10, got '{0}'")]
    InvalidLimit(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Research(#[from] ResearchError),

    #[error("{0}")]
    Export(#[from] ExportError),
}

/// How an error is reported: warnings mean nothing happened and the user
/// can correct the input; failures mean an action was attempted and aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Failure,
}

impl AppError {
    pub fn severity(&self) -> Severity {
        match self {
            AppError::EmptyTopic
            | AppError::EmptyQuestion
            | AppError::NoSession
            | AppError::InvalidLimit(_) => Severity::Warning,
            _ => Severity::Failure,
        }
    }

    /// The error text plus a hint where the user can act on it.
    pub fn user_message(&self) -> String {
        let llm = match self {
            AppError::Llm(e) | AppError::Research(ResearchError::Llm(e)) => Some(e),
            _ => None,
        };
        match llm {
            Some(LlmError::RateLimited) => format!("{self} (retriable)"),
            Some(LlmError::QuotaExhausted(_)) => {
                format!("{self}; check your API billing at https://platform.openai.com")
            }
            Some(LlmError::Unauthorized(_) | LlmError::ApiKeyNotSet) => {
                format!("{self}; check OPENAI_API_KEY")
            }
            _ => self.to_string(),
        }
    }
}
