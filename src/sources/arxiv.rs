use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{PaperSource, SourceError, clean_text, status_error};
use crate::paper::{RawPaper, SourceKind};

const API_BASE: &str = "https://export.arxiv.org";

/// Characters left unescaped in the query, matching common URL-quoting rules.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    id: String,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Client for the arXiv query API (Atom feed responses).
#[derive(Clone)]
pub struct ArxivClient {
    http: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    fn query_url(&self, query: &str, limit: u8) -> String {
        let encoded = utf8_percent_encode(query, QUERY_ESCAPE);
        format!(
            "{}/api/query?search_query=all:{encoded}&start=0&max_results={limit}",
            self.base_url
        )
    }

    fn network_error(err: reqwest::Error) -> SourceError {
        SourceError::Network {
            source_kind: SourceKind::Arxiv,
            err,
        }
    }
}

impl PaperSource for ArxivClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Arxiv
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<RawPaper>, SourceError> {
        let response = self
            .http
            .get(self.query_url(query, limit))
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await
            .map_err(Self::network_error)?;

        if !response.status().is_success() {
            return Err(status_error(SourceKind::Arxiv, response).await);
        }

        let body = response.text().await.map_err(Self::network_error)?;
        let papers = parse_feed(&body)?;
        debug!(query, count = papers.len(), "arxiv search complete");
        Ok(papers)
    }
}

fn parse_feed(xml: &str) -> Result<Vec<RawPaper>, SourceError> {
    let feed: AtomFeed = from_str(xml).map_err(|e| SourceError::Parse {
        source_kind: SourceKind::Arxiv,
        message: format!("invalid atom xml: {e}"),
    })?;

    // The API reports bad queries as a single entry with an errors id.
    if let Some(error) = feed.entries.iter().find(|e| e.id.contains("/api/errors")) {
        return Err(SourceError::Parse {
            source_kind: SourceKind::Arxiv,
            message: error
                .summary
                .as_deref()
                .map(clean_text)
                .unwrap_or_else(|| "query rejected".to_string()),
        });
    }

    Ok(feed.entries.into_iter().map(to_raw).collect())
}

fn to_raw(entry: AtomEntry) -> RawPaper {
    let year = entry
        .published
        .as_deref()
        .and_then(|p| p.trim().get(..4))
        .and_then(|y| y.parse().ok());

    let url = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| entry.links.first())
        .and_then(|l| l.href.clone())
        .or_else(|| Some(entry.id.trim().to_string()).filter(|id| !id.is_empty()));

    RawPaper {
        title: entry.title.as_deref().map(clean_text),
        abstract_text: entry.summary.as_deref().map(clean_text),
        year,
        authors: entry
            .authors
            .into_iter()
            .map(|a| clean_text(&a.name))
            .collect(),
        url,
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONE_ENTRY: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <published>2024-01-01T00:00:00Z</published>
    <title>Only Entry</title>
    <summary>Abstract text.</summary>
    <author><name>C. Three</name></author>
    <link href="http://arxiv.org/abs/2401.00001v1" rel="alternate" type="text/html"/>
  </entry>
</feed>"#;

    #[tokio::test]
    async fn search_requests_limit_and_parses_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .and(query_param("search_query", "all:quantum computing"))
            .and(query_param("start", "0"))
            .and(query_param("max_results", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ONE_ENTRY))
            .expect(1)
            .mount(&server)
            .await;

        let client = ArxivClient::with_base_url(Client::new(), &server.uri());
        let papers = client.search("quantum computing", 3).await.unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title.as_deref(), Some("Only Entry"));
    }

    #[tokio::test]
    async fn search_503_returns_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ArxivClient::with_base_url(Client::new(), &server.uri());
        let result = client.search("x", 1).await;
        assert!(matches!(result, Err(SourceError::Status { code: 503, .. })));
    }
}
