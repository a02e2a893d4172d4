//! PDF export of the current session: topic heading, then title and summary
//! per paper, rendered with the standard Helvetica fonts.

mod fonts;
pub mod layout;
mod render;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::paper::SummarizedPaper;

pub const DEFAULT_FILE_NAME: &str = "research.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to render PDF: {0}")]
    Render(String),

    #[error("failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Write the document to `path`, replacing any earlier export, and return
/// the path written.
pub fn export_pdf(
    topic: &str,
    papers: &[SummarizedPaper],
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let pages = layout::layout(&layout::build_blocks(topic, papers));
    let mut doc = render::render(&pages)?;
    doc.save(path).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), pages = pages.len(), papers = papers.len(), "pdf exported");
    Ok(path.to_path_buf())
}
