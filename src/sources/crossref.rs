use std::env;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{PaperSource, SourceError, clean_text, status_error};
use crate::paper::{RawPaper, SourceKind};

const API_BASE: &str = "https://api.crossref.org";

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Envelope of `GET /works`. Both `message` and `items` are required.
#[derive(Debug, Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Deserialize)]
struct WorksMessage {
    items: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct Work {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    issued: Option<PartialDate>,
    #[serde(default)]
    author: Vec<Author>,
    #[serde(rename = "URL")]
    url: Option<String>,
}

/// Crossref dates look like `{"date-parts": [[2019, 5, 14]]}`; any part may be null.
#[derive(Debug, Deserialize)]
struct PartialDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

#[derive(Debug, Deserialize)]
struct Author {
    family: Option<String>,
}

/// Client for the Crossref works search API.
///
/// Setting `CROSSREF_MAILTO` routes requests through Crossref's polite pool.
#[derive(Clone)]
pub struct CrossrefClient {
    http: Client,
    base_url: String,
    mailto: Option<String>,
}

impl CrossrefClient {
    pub fn from_env(http: Client) -> Self {
        let mailto = env::var("CROSSREF_MAILTO")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        Self {
            http,
            base_url: API_BASE.to_string(),
            mailto,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            mailto: None,
        }
    }

    fn network_error(err: reqwest::Error) -> SourceError {
        SourceError::Network {
            source_kind: SourceKind::Crossref,
            err,
        }
    }
}

impl PaperSource for CrossrefClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Crossref
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawPaper>, SourceError> {
        let mut params = vec![("query", query.to_string()), ("rows", limit.to_string())];
        if let Some(mailto) = &self.mailto {
            params.push(("mailto", mailto.clone()));
        }
        let url = url::Url::parse_with_params(&format!("{}/works", self.base_url), &params)
            .map_err(|e| SourceError::InvalidUrl(SourceKind::Crossref, e))?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await
            .map_err(Self::network_error)?;

        if !response.status().is_success() {
            return Err(status_error(SourceKind::Crossref, response).await);
        }

        let body = response.text().await.map_err(Self::network_error)?;
        let papers = parse_works(&body)?;
        debug!(query, count = papers.len(), "crossref search complete");
        Ok(papers)
    }
}

fn parse_works(body: &str) -> Result<Vec<RawPaper>, SourceError> {
    let response: WorksResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse {
            source_kind: SourceKind::Crossref,
            message: e.to_string(),
        })?;

    Ok(response.message.items.into_iter().map(to_raw).collect())
}

fn to_raw(work: Work) -> RawPaper {
    let year = work
        .issued
        .and_then(|d| d.date_parts.into_iter().next())
        .and_then(|parts| parts.into_iter().next())
        .flatten();

    RawPaper {
        title: work.title.into_iter().next(),
        abstract_text: work.abstract_text.map(|a| strip_tags(&a)),
        year,
        authors: work
            .author
            .into_iter()
            .map(|a| a.family.unwrap_or_default())
            .collect(),
        url: work.url,
    }
}

/// Crossref abstracts are JATS XML fragments (`<jats:p>...</jats:p>`).
fn strip_tags(s: &str) -> String {
    clean_text(&TAG.replace_all(s, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_jats_markup() {
        let s = "<jats:title>Abstract</jats:title>\n  <jats:p>We study <i>qubits</i>.</jats:p>";
        assert_eq!(strip_tags(s), "Abstract We study qubits.");
    }

    #[test]
    fn parses_full_item() {
        let body = serde_json::json!({
            "status": "ok",
            "message": {
                "items": [{
                    "title": ["Quantum Computing: An Overview", "ignored"],
                    "abstract": "<jats:p>A survey.</jats:p>",
                    "issued": {"date-parts": [[2019, 5, 14]]},
                    "author": [{"given": "Ada", "family": "Lovelace"}, {"name": "Consortium"}],
                    "URL": "https://doi.org/10.1000/xyz"
                }]
            }
        })
        .to_string();

        let papers = parse_works(&body).unwrap();
        assert_eq!(papers.len(), 1);
        let p = &papers[0];
        assert_eq!(p.title.as_deref(), Some("Quantum Computing: An Overview"));
        assert_eq!(p.abstract_text.as_deref(), Some("A survey."));
        assert_eq!(p.year, Some(2019));
        assert_eq!(p.authors, vec!["Lovelace".to_string(), String::new()]);
        assert_eq!(p.url.as_deref(), Some("https://doi.org/10.1000/xyz"));
    }

    #[test]
    fn missing_fields_stay_empty() {
        let body = r#"{"message": {"items": [{}, {"issued": {"date-parts": [[null]]}}]}}"#;
        let papers = parse_works(body).unwrap();
        assert_eq!(papers.len(), 2);
        assert!(papers[0].title.is_none());
        assert!(papers[0].abstract_text.is_none());
        assert!(papers[0].year.is_none());
        assert!(papers[1].year.is_none());
    }

    #[test]
    fn missing_items_is_parse_error() {
        let err = parse_works(r#"{"message": {}}"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_works("<html>oops</html>").unwrap_err();
        assert!(err.to_string().contains("Crossref"), "got: {err}");
    }
}
