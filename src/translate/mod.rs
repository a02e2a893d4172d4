//! Summary translation through an external machine-translation service.

pub mod google;
mod lang;

pub use google::GoogleTranslator;
pub use lang::Language;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("translation service returned status {0}")]
    Status(u16),

    #[error("unexpected translation response: {0}")]
    Malformed(String),

    #[error("invalid translation endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Translate text from an auto-detected source language.
/// Implemented by `GoogleTranslator`; mocks are used in tests.
pub trait Translate {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;
}
