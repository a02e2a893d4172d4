use tracing::info;

use super::ResearchError;
use super::summarize::summarize;
use crate::llm::CompletionClient;
use crate::paper::{Paper, RawPaper, SourceKind, SummarizedPaper};
use crate::sources::{PaperSource, SourceError};
use crate::translate::{Language, Translate};

/// Concatenate per-source batches in the given order, filling defaults.
/// No deduplication: a paper listed by both sources appears twice.
pub fn aggregate(batches: Vec<(SourceKind, Vec<RawPaper>)>) -> Vec<Paper> {
    batches
        .into_iter()
        .flat_map(|(kind, raws)| raws.into_iter().map(move |raw| Paper::from_raw(raw, kind)))
        .collect()
}

/// Query `first` and then `second`, strictly one after the other.
pub async fn gather(
    first: &impl PaperSource,
    second: &impl PaperSource,
    query: &str,
    limit: u8,
) -> Result<Vec<Paper>, SourceError> {
    let first_batch = first.search(query, limit).await?;
    info!(source = %first.kind(), count = first_batch.len(), "source searched");

    let second_batch = second.search(query, limit).await?;
    info!(source = %second.kind(), count = second_batch.len(), "source searched");

    Ok(aggregate(vec![
        (first.kind(), first_batch),
        (second.kind(), second_batch),
    ]))
}

/// Summarize (and, for non-English output, translate) every paper in order.
/// The first failure aborts the whole batch.
pub async fn summarize_all(
    papers: Vec<Paper>,
    llm: &impl CompletionClient,
    translator: &impl Translate,
    language: Language,
) -> Result<Vec<SummarizedPaper>, ResearchError> {
    let total = papers.len();
    let mut out = Vec::with_capacity(total);

    for (i, paper) in papers.into_iter().enumerate() {
        let mut summary = summarize(llm, &paper.abstract_text).await?;
        if language.needs_translation() {
            summary = translator.translate(&summary, language).await?;
        }
        info!(index = i + 1, total, title = %paper.title, "paper processed");
        out.push(SummarizedPaper { paper, summary });
    }

    Ok(out)
}
