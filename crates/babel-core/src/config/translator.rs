use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Backends accepted in `[translator].backend`.
pub const KNOWN_BACKENDS: &[&str] = &["google", "libretranslate"];

/// Translation backend config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Which backend to use: "google" or "libretranslate".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Detection only looks at this many leading characters of a message.
    #[serde(default = "default_detect_prefix_chars")]
    pub detect_prefix_chars: usize,
    /// HTTP timeout for a single backend call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub libretranslate: LibreTranslateConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            detect_prefix_chars: default_detect_prefix_chars(),
            timeout_secs: default_timeout_secs(),
            google: GoogleConfig::default(),
            libretranslate: LibreTranslateConfig::default(),
        }
    }
}

/// Google web-translate endpoint config (no key required).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
        }
    }
}

/// LibreTranslate server config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibreTranslateConfig {
    #[serde(default = "default_libretranslate_url")]
    pub url: String,
    /// API key. Overridden by `LIBRETRANSLATE_API_KEY`. Empty = no key.
    #[serde(default)]
    pub api_key: String,
}

impl Default for LibreTranslateConfig {
    fn default() -> Self {
        Self {
            url: default_libretranslate_url(),
            api_key: String::new(),
        }
    }
}
