//! LibreTranslate backend.
//!
//! Talks to a self-hosted or hosted LibreTranslate server via `/detect` and
//! `/translate`. An API key is only sent when configured.
//! Docs: <https://libretranslate.com/docs>

use async_trait::async_trait;
use babel_core::{error::BabelError, traits::Translator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// LibreTranslate backend.
pub struct LibreTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// --- Serde types ---

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Deserialize)]
struct Detection {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Map a table code to the code LibreTranslate expects.
fn to_libre_code(code: &str) -> &str {
    match code {
        "zh-CN" => "zh",
        "no" => "nb",
        other => other,
    }
}

/// Map a LibreTranslate code back to the table's code.
fn from_libre_code(code: &str) -> String {
    match code {
        "zh" | "zh-Hans" => "zh-CN".to_string(),
        "nb" => "no".to_string(),
        other => other.to_string(),
    }
}

/// Pick the most confident detection.
fn best_detection(detections: Vec<Detection>) -> Option<String> {
    detections
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| from_libre_code(&d.language))
}

impl LibreTranslator {
    /// Create a new backend for the server at `base_url`.
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    fn key(&self) -> Option<&str> {
        (!self.api_key.is_empty()).then_some(self.api_key.as_str())
    }

    /// Turn a non-success response into an error message.
    async fn error_text(resp: reqwest::Response) -> String {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => format!("libretranslate returned {status}: {}", err.error),
            Err(_) => format!("libretranslate returned {status}: {body}"),
        }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn detect(&self, text: &str) -> Result<String, BabelError> {
        let url = self.url("detect");
        debug!("libretranslate: POST {url}");

        let resp = self
            .client
            .post(&url)
            .json(&DetectRequest {
                q: text,
                api_key: self.key(),
            })
            .send()
            .await
            .map_err(|e| BabelError::Detection(format!("libretranslate request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(BabelError::Detection(Self::error_text(resp).await));
        }

        let detections: Vec<Detection> = resp.json().await.map_err(|e| {
            BabelError::Detection(format!("libretranslate: failed to parse response: {e}"))
        })?;

        best_detection(detections)
            .ok_or_else(|| BabelError::Detection("libretranslate: no detection returned".into()))
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, BabelError> {
        let url = self.url("translate");
        debug!("libretranslate: POST {url} source={source} target={target}");

        let resp = self
            .client
            .post(&url)
            .json(&TranslateRequest {
                q: text,
                source: to_libre_code(source),
                target: to_libre_code(target),
                format: "text",
                api_key: self.key(),
            })
            .send()
            .await
            .map_err(|e| BabelError::Translation(format!("libretranslate request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(BabelError::Translation(Self::error_text(resp).await));
        }

        let parsed: TranslateResponse = resp.json().await.map_err(|e| {
            BabelError::Translation(format!("libretranslate: failed to parse response: {e}"))
        })?;

        Ok(parsed.translated_text)
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.url("languages")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("libretranslate not available: {e}");
                false
            }
        }
    }
}
