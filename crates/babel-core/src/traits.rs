use crate::{
    error::BabelError,
    message::{InboundEvent, OutgoingMessage, SourceMessage, UserProfile},
};
use async_trait::async_trait;
use std::time::Duration;

/// Source code passed to a backend when the language is unknown.
pub const AUTO_SOURCE: &str = "auto";

/// Translation backend trait — the dictionary.
///
/// Every machine-translation service (Google, LibreTranslate, ...) implements
/// this trait so the reaction handler never depends on a concrete backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Detect the language of `text`, returning its code (e.g. "en").
    async fn detect(&self, text: &str) -> Result<String, BabelError>;

    /// Translate `text` from `source` (a code or [`AUTO_SOURCE`]) into `target`.
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, BabelError>;

    /// Check if the backend is reachable.
    async fn is_available(&self) -> bool;
}

/// Messaging Channel trait — the platform client.
///
/// Wraps everything the bot needs from the chat platform: inbound event
/// delivery plus the handful of REST operations the handlers call.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for events.
    /// Returns a receiver that yields reactions and commands.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<InboundEvent>, BabelError>;

    /// The bot's own user ID, once connected.
    fn bot_user_id(&self) -> Option<u64>;

    /// Fetch a message by channel and message ID.
    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<SourceMessage, BabelError>;

    /// Fetch a user by ID.
    async fn fetch_user(&self, user_id: u64) -> Result<UserProfile, BabelError>;

    /// Send a message. Replies that the platform refuses as replies fail with
    /// [`BabelError::ReplyRejected`].
    ///
    /// Text over the platform's length limit goes out as several messages,
    /// only the first threaded as a reply. Sending stops at the first failed
    /// chunk and returns its error; chunks already posted are not retracted,
    /// so an error after the first chunk means a partial message is visible.
    async fn send(&self, message: OutgoingMessage) -> Result<(), BabelError>;

    /// Send a plain message that is deleted again after `ttl`.
    async fn send_transient(
        &self,
        channel_id: u64,
        text: &str,
        ttl: Duration,
    ) -> Result<(), BabelError>;

    /// Round-trip latency to the platform.
    async fn latency(&self) -> Result<Duration, BabelError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BabelError>;
}
