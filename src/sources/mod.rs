//! Literature search backends. Each adapter maps one API to `RawPaper`s.

pub mod arxiv;
pub mod crossref;

pub use arxiv::ArxivClient;
pub use crossref::CrossrefClient;

use crate::paper::{RawPaper, SourceKind};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{source_kind} request failed: {err}")]
    Network {
        source_kind: SourceKind,
        #[source]
        err: reqwest::Error,
    },

    #[error("{source_kind} returned status {code}: {message}")]
    Status {
        source_kind: SourceKind,
        code: u16,
        message: String,
    },

    #[error("{source_kind} response could not be parsed: {message}")]
    Parse {
        source_kind: SourceKind,
        message: String,
    },

    #[error("invalid {0} endpoint URL: {1}")]
    InvalidUrl(SourceKind, url::ParseError),
}

/// A search backend returning papers in its native ranking order.
/// Implemented by `CrossrefClient` and `ArxivClient`; mocks are used in tests.
pub trait PaperSource {
    fn kind(&self) -> SourceKind;

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawPaper>, SourceError>;
}

/// Read a failed response body into a short error message.
async fn status_error(source_kind: SourceKind, response: reqwest::Response) -> SourceError {
    let code = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let end = text.floor_char_boundary(200);
    SourceError::Status {
        source_kind,
        code,
        message: text[..end].trim().to_string(),
    }
}

/// Collapse runs of whitespace (including feed indentation) to single spaces.
fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
