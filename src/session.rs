use crate::paper::SummarizedPaper;

/// Results of the last successful fetch. Replaced wholesale by each fetch and
/// read by ask, export and show.
#[derive(Debug, Default)]
pub struct Session {
    current_topic: Option<String>,
    papers: Vec<SummarizedPaper>,
}

/// Borrowed view of a populated session.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub topic: &'a str,
    pub papers: &'a [SummarizedPaper],
}

impl Session {
    pub fn replace(&mut self, topic: &str, papers: Vec<SummarizedPaper>) {
        self.current_topic = Some(topic.to_string());
        self.papers = papers;
    }

    /// `None` until the first successful fetch.
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        self.current_topic.as_deref().map(|topic| Snapshot {
            topic,
            papers: &self.papers,
        })
    }
}
