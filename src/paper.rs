use std::fmt;

pub const NO_TITLE: &str = "No title";

/// Which search backend a paper came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Crossref,
    Arxiv,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Crossref => "Crossref",
            SourceKind::Arxiv => "arXiv",
        })
    }
}

/// A record as extracted by a source adapter, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct RawPaper {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub year: Option<i32>,
    pub authors: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub title: String,
    pub abstract_text: String,
    /// `None` when the source did not report a usable year.
    pub year: Option<i32>,
    pub authors: Vec<String>,
    pub url: String,
    pub source: SourceKind,
}

impl Paper {
    /// The single place where placeholder values are filled in.
    pub fn from_raw(raw: RawPaper, source: SourceKind) -> Self {
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());
        Self {
            title,
            abstract_text: raw.abstract_text.unwrap_or_default(),
            year: raw.year.filter(|y| *y > 0),
            authors: raw.authors,
            url: raw.url.unwrap_or_default(),
            source,
        }
    }

    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "n.d.".to_string())
    }
}

/// A paper whose summary has been produced (and translated if requested).
/// Everything downstream of the fetch step works on this type only.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizedPaper {
    pub paper: Paper,
    pub summary: String,
}
