//! Google web-translate backend.
//!
//! Uses the keyless `translate_a/single` endpoint (`client=gtx`). The
//! response is a positional JSON array: element 0 holds the translated
//! segments, element 2 the detected source language.

use async_trait::async_trait;
use babel_core::{
    error::BabelError,
    traits::{Translator, AUTO_SOURCE},
};
use serde_json::Value;
use tracing::{debug, warn};

/// Google backend using the public web endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

/// Parsed pieces of a `translate_a/single` response.
#[derive(Debug, PartialEq, Eq)]
struct GtxResponse {
    text: String,
    detected: Option<String>,
}

impl GoogleTranslator {
    /// Create a new backend against `base_url`.
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<GtxResponse, BabelError> {
        let url = format!("{}/translate_a/single", self.base_url.trim_end_matches('/'));
        debug!("google: POST {url} sl={source} tl={target} ({} chars)", text.chars().count());

        let resp = self
            .client
            .post(&url)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| BabelError::Translation(format!("google request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BabelError::Translation(format!(
                "google returned {status}: {body}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| BabelError::Translation(format!("google: failed to parse response: {e}")))?;

        parse_gtx(&body)
    }
}

/// Extract translated text and detected language from a gtx response body.
fn parse_gtx(body: &Value) -> Result<GtxResponse, BabelError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BabelError::Translation("google: response has no segments".into()))?;

    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();

    let detected = body
        .get(2)
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())
        .map(str::to_string);

    Ok(GtxResponse { text, detected })
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn detect(&self, text: &str) -> Result<String, BabelError> {
        let resp = self
            .request(text, AUTO_SOURCE, "en")
            .await
            .map_err(|e| BabelError::Detection(e.to_string()))?;
        resp.detected
            .ok_or_else(|| BabelError::Detection("google: no source language in response".into()))
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, BabelError> {
        Ok(self.request(text, source, target).await?.text)
    }

    async fn is_available(&self) -> bool {
        match self.request("hello", "en", "fr").await {
            Ok(_) => true,
            Err(e) => {
                warn!("google not available: {e}");
                false
            }
        }
    }
}
