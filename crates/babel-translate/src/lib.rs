//! # babel-translate
//!
//! Machine-translation backends for Babel.

pub mod google;
pub mod libretranslate;

use babel_core::{config::TranslatorConfig, error::BabelError, traits::Translator};
use std::sync::Arc;
use std::time::Duration;

/// Build the configured translation backend.
pub fn build_translator(cfg: &TranslatorConfig) -> Result<Arc<dyn Translator>, BabelError> {
    let client = http_client(cfg.timeout_secs)?;
    match cfg.backend.as_str() {
        "google" => Ok(Arc::new(google::GoogleTranslator::new(
            client,
            cfg.google.base_url.clone(),
        ))),
        "libretranslate" => Ok(Arc::new(libretranslate::LibreTranslator::new(
            client,
            cfg.libretranslate.url.clone(),
            cfg.libretranslate.api_key.clone(),
        ))),
        other => Err(BabelError::Config(format!(
            "unsupported translator backend: {other}"
        ))),
    }
}

/// HTTP client shared by all calls of one backend.
fn http_client(timeout_secs: u64) -> Result<reqwest::Client, BabelError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BabelError::Config(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_google() {
        let cfg = TranslatorConfig::default();
        let t = build_translator(&cfg).unwrap();
        assert_eq!(t.name(), "google");
    }

    #[test]
    fn test_build_libretranslate() {
        let cfg = TranslatorConfig {
            backend: "libretranslate".into(),
            ..Default::default()
        };
        let t = build_translator(&cfg).unwrap();
        assert_eq!(t.name(), "libretranslate");
    }

    #[test]
    fn test_build_unknown_backend() {
        let cfg = TranslatorConfig {
            backend: "babelfish".into(),
            ..Default::default()
        };
        assert!(matches!(
            build_translator(&cfg),
            Err(BabelError::Config(_))
        ));
    }
}
