use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Language, Translate, TranslateError};

const API_BASE: &str = "https://translate.googleapis.com";

/// Client for Google Translate's public `translate_a/single` endpoint.
/// No key is needed; the source language is always auto-detected.
#[derive(Clone)]
pub struct GoogleTranslator {
    http: Client,
    base_url: String,
}

impl GoogleTranslator {
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
}

impl Translate for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        let url = url::Url::parse_with_params(
            &format!("{}/translate_a/single", self.base_url),
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ],
        )?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let translated = join_segments(&body)?;
        debug!(lang = target.code(), chars = translated.len(), "translation complete");
        Ok(translated)
    }
}

/// The response is a nested array: `[[["translated", "original", ...], ...], ...]`.
/// Long inputs are split into several segments that must be concatenated.
fn join_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::Malformed("no translated text".to_string()));
    }
    Ok(translated)
}
