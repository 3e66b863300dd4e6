//! Built-in text commands — instant responses, no translation call.


use babel_core::{
    languages::{flag_table, language_name},
    traits::Channel,
};
use tracing::warn;

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
}

impl Command {
    /// Parse a command from message text. Returns `None` when the text does
    /// not start with `prefix` or names an unknown command.
    pub fn parse(text: &str, prefix: &str) -> Option<Self> {
        let first = text.trim_start().split_whitespace().next()?;
        let name = first.strip_prefix(prefix)?;
        match name.to_lowercase().as_str() {
            "ping" => Some(Self::Ping),
            "help" | "flags" | "languages" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Handle a command and return the response text.
pub async fn handle(cmd: Command, channel: &dyn Channel, prefix: &str) -> String {
    match cmd {
        Command::Ping => handle_ping(channel).await,
        Command::Help => help_text(prefix),
    }
}

async fn handle_ping(channel: &dyn Channel) -> String {
    match channel.latency().await {
        Ok(latency) => format!("Pong! Latency: {}ms", latency.as_millis()),
        Err(e) => {
            warn!("latency probe failed: {e}");
            "Pong! Latency: unavailable".to_string()
        }
    }
}

/// Flag → language listing, also used by `babel flags`.
pub fn help_text(prefix: &str) -> String {
    let mut out = String::from(
        "React to any message with a flag and I'll reply with a translation.\n\n",
    );
    for (flag, codes) in flag_table() {
        let names: Vec<String> = codes.iter().map(|c| language_name(c)).collect();
        out.push_str(&format!("{flag} → {}\n", names.join(", ")));
    }
    out.push_str(&format!(
        "\nCommands: `{prefix}ping` (latency), `{prefix}help` (this list)"
    ));
    out
}
