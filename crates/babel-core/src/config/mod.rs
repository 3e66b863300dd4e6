mod channels;
mod defaults;
mod translator;


pub use channels::*;
pub use translator::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BabelError;
use defaults::*;

/// Environment variable holding the Discord bot token.
pub const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";
/// Environment variable holding the LibreTranslate API key.
pub const LIBRETRANSLATE_KEY_ENV: &str = "LIBRETRANSLATE_API_KEY";

/// Top-level Babel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub babel: BabelConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BabelConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional log file, written in addition to stderr. Empty = stderr only.
    #[serde(default)]
    pub log_file: String,
}

impl Default for BabelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl Config {
    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.discord.bot_token = token.trim().to_string();
        }
        if let Some(key) = lookup(LIBRETRANSLATE_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.translator.libretranslate.api_key = key.trim().to_string();
        }
    }

    /// Validate settings required to connect.
    pub fn validate(&self) -> Result<(), BabelError> {
        if self.discord.bot_token.trim().is_empty() {
            return Err(BabelError::Config(format!(
                "{TOKEN_ENV} is not set. Put DISCORD_BOT_TOKEN=<token> in the environment \
                 or a .env file, or set [discord].bot_token in the config file."
            )));
        }
        self.validate_translator()?;
        if self.discord.command_prefix.is_empty() {
            return Err(BabelError::Config(
                "[discord].command_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Validate the translator section only (enough for offline use).
    pub fn validate_translator(&self) -> Result<(), BabelError> {
        if !KNOWN_BACKENDS.contains(&self.translator.backend.as_str()) {
            return Err(BabelError::Config(format!(
                "unknown translator backend '{}' (expected one of: {})",
                self.translator.backend,
                KNOWN_BACKENDS.join(", ")
            )));
        }
        if self.translator.detect_prefix_chars == 0 {
            return Err(BabelError::Config(
                "[translator].detect_prefix_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. Environment overrides
/// are applied by the caller via [`Config::apply_env`].
pub fn load(path: &str) -> Result<Config, BabelError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BabelError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| BabelError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
