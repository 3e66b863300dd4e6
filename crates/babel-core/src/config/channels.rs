use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Discord bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token. Overridden by `DISCORD_BOT_TOKEN` when that is set.
    #[serde(default)]
    pub bot_token: String,
    /// Prefix for text commands (`!ping`, `!help`).
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Seconds before transient notices are deleted.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
    /// Messages kept per channel in the gateway cache. Reactions on cached
    /// messages skip the REST fetch.
    #[serde(default = "default_message_cache_size")]
    pub message_cache_size: usize,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            command_prefix: default_command_prefix(),
            notice_ttl_secs: default_notice_ttl_secs(),
            message_cache_size: default_message_cache_size(),
        }
    }
}
