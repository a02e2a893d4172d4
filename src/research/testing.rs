//! Hand-written doubles for the service traits, with call recording.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::{CompletionClient, LlmError};
use crate::paper::{Paper, RawPaper, SourceKind, SummarizedPaper};
use crate::sources::{PaperSource, SourceError};
use crate::translate::{Language, Translate, TranslateError};

pub(crate) struct MockLlm {
    scripted: Mutex<VecDeque<Result<String, LlmError>>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            fallback: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replies in order, then fails with `RateLimited`.
    pub(crate) fn scripted(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            scripted: Mutex::new(replies.into()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionClient for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(reply) = self.scripted.lock().unwrap().pop_front() {
            return reply;
        }
        self.fallback.clone().ok_or(LlmError::RateLimited)
    }
}

pub(crate) struct MockTranslator {
    calls: Mutex<Vec<(String, Language)>>,
    fail: bool,
}

impl MockTranslator {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Translate for MockTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        self.calls.lock().unwrap().push((text.to_string(), target));
        if self.fail {
            return Err(TranslateError::Status(503));
        }
        Ok(format!("[{}] {text}", target.code()))
    }
}

pub(crate) struct MockSource {
    kind: SourceKind,
    result: Mutex<Option<Result<Vec<RawPaper>, SourceError>>>,
    calls: Mutex<Vec<(String, u8)>>,
}

impl MockSource {
    /// Returns at most `limit` of the given papers, like a real API would.
    pub(crate) fn with_papers(kind: SourceKind, papers: Vec<RawPaper>) -> Self {
        Self {
            kind,
            result: Mutex::new(Some(Ok(papers))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_titles(kind: SourceKind, titles: &[&str]) -> Self {
        Self::with_papers(kind, titles.iter().map(|t| raw(t, "abstract")).collect())
    }

    pub(crate) fn failing(kind: SourceKind) -> Self {
        Self {
            kind,
            result: Mutex::new(Some(Err(SourceError::Status {
                source_kind: kind,
                code: 503,
                message: "unavailable".into(),
            }))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, u8)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PaperSource for MockSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawPaper>, SourceError> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        match self.result.lock().unwrap().take() {
            Some(Ok(papers)) => Ok(papers.into_iter().take(limit as usize).collect()),
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn raw(title: &str, abstract_text: &str) -> RawPaper {
    RawPaper {
        title: Some(title.to_string()),
        abstract_text: Some(abstract_text.to_string()),
        year: Some(2024),
        authors: vec!["Author".to_string()],
        url: Some(format!("https://example.org/{title}")),
    }
}

pub(crate) fn summarized(title: &str, summary: &str) -> SummarizedPaper {
    SummarizedPaper {
        paper: Paper::from_raw(raw(title, "abstract"), SourceKind::Crossref),
        summary: summary.to_string(),
    }
}
