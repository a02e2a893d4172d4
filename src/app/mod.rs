mod errors;

pub use errors::{AppError, Severity};

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::export;
use crate::llm::OpenAiClient;
use crate::markdown::format_papers;
use crate::research::{self, ResearchError};
use crate::session::Session;
use crate::sources::{ArxivClient, CrossrefClient};
use crate::translate::{GoogleTranslator, Language};

/// TCP connection establishment timeout. Requests themselves have no
/// deadline: a slow completion is awaited for as long as it takes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const MIN_LIMIT: u8 = 1;
pub const MAX_LIMIT: u8 = 10;
pub const DEFAULT_LIMIT: u8 = 5;

/// User-adjustable options for subsequent actions.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Results requested from each source.
    pub limit: u8,
    pub language: Language,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            language: Language::default(),
            output: PathBuf::from(export::DEFAULT_FILE_NAME),
        }
    }
}

/// The research assistant: service clients plus the session they feed.
///
/// Configuration via environment variables:
/// - `OPENAI_API_KEY`: required; construction fails without it
/// - `OPENAI_MODEL`, `OPENAI_BASE_URL`: optional model overrides
/// - `CROSSREF_MAILTO`: optional contact address for Crossref's polite pool
pub struct Assistant {
    crossref: CrossrefClient,
    arxiv: ArxivClient,
    llm: OpenAiClient,
    translator: GoogleTranslator,
    session: Session,
    settings: Settings,
}

impl Assistant {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let http = http_client()?;
        let llm = OpenAiClient::from_env(http.clone())?;
        info!(model = llm.model(), "language model configured");
        Ok(Self {
            crossref: CrossrefClient::from_env(http.clone()),
            arxiv: ArxivClient::new(http.clone()),
            llm,
            translator: GoogleTranslator::new(http),
            session: Session::default(),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    pub fn set_limit(&mut self, limit: u8) -> Result<(), AppError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::InvalidLimit(limit.to_string()));
        }
        self.settings.limit = limit;
        Ok(())
    }

    /// Search both sources, summarize every hit, and replace the session.
    /// On failure the previous session is kept. Returns the paper count.
    pub async fn fetch(&mut self, topic: &str) -> Result<usize, AppError> {
        if topic.trim().is_empty() {
            return Err(AppError::EmptyTopic);
        }

        let Settings {
            limit, language, ..
        } = self.settings;
        info!(topic, limit, language = %language, "fetching papers");

        let papers = research::gather(&self.crossref, &self.arxiv, topic, limit)
            .await
            .map_err(ResearchError::from)?;
        let processed =
            research::summarize_all(papers, &self.llm, &self.translator, language).await?;

        let count = processed.len();
        self.session.replace(topic, processed);
        info!(count, "fetch complete");
        Ok(count)
    }

    pub async fn ask(&self, question: &str) -> Result<String, AppError> {
        let snapshot = self.session.snapshot().ok_or(AppError::NoSession)?;
        if question.trim().is_empty() {
            return Err(AppError::EmptyQuestion);
        }

        info!(question, papers = snapshot.papers.len(), "asking question");
        let context = research::build_context(snapshot.papers);
        Ok(research::ask(&self.llm, &context, question).await?)
    }

    /// Export the session to `path`, or to the configured output file.
    pub fn export(&self, path: Option<&Path>) -> Result<PathBuf, AppError> {
        let snapshot = self.session.snapshot().ok_or(AppError::NoSession)?;
        let path = path.unwrap_or(self.settings.output.as_path());
        Ok(export::export_pdf(snapshot.topic, snapshot.papers, path)?)
    }

    /// Markdown rendering of the session's papers.
    pub fn show(&self) -> Result<String, AppError> {
        let snapshot = self.session.snapshot().ok_or(AppError::NoSession)?;
        Ok(format_papers(snapshot.topic, snapshot.papers))
    }
}

/// Shared by every service client.
fn http_client() -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(AppError::HttpClient)
}

#[cfg(test)]
impl Assistant {
    /// Every service pointed at one mock server.
    pub(crate) fn with_base_url(uri: &str, settings: Settings) -> Self {
        let http = Client::new();
        Self {
            crossref: CrossrefClient::with_base_url(http.clone(), uri),
            arxiv: ArxivClient::with_base_url(http.clone(), uri),
            llm: OpenAiClient::with_base_url(http.clone(), uri),
            translator: GoogleTranslator::with_base_url(http, uri),
            session: Session::default(),
            settings,
        }
    }
}
