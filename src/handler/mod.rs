//! Reaction handler: flag reaction in, translated reply out.
//!
//! One call to [`ReactionHandler::handle`] per reaction-added event. The
//! handler never returns an error to the event loop: missing entities abort
//! quietly, anything else unexpected turns into a short-lived apology.

pub mod compose;
pub mod pipeline;


use babel_core::{
    config::Config,
    error::BabelError,
    languages::languages_for_flag,
    message::{mention, OutgoingMessage, ReactionEvent},
    traits::{Channel, Translator},
};
use compose::{apology_notice, compose_reply, empty_message_notice};
use pipeline::{detect_source, translate_targets};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tunables for the reaction handler.
#[derive(Debug, Clone, Copy)]
pub struct HandlerSettings {
    /// Characters of the message handed to language detection.
    pub detect_prefix_chars: usize,
    /// Lifetime of transient notices.
    pub notice_ttl: Duration,
}

impl HandlerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            detect_prefix_chars: config.translator.detect_prefix_chars,
            notice_ttl: Duration::from_secs(config.discord.notice_ttl_secs),
        }
    }
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            detect_prefix_chars: 1000,
            notice_ttl: Duration::from_secs(10),
        }
    }
}

/// How a reaction event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The bot reacted itself.
    IgnoredSelf,
    /// Another bot reacted.
    IgnoredBot,
    /// Not a flag we know.
    UnknownEmoji,
    /// The user, message, or channel is gone or not visible to the bot.
    EntityMissing,
    /// The message had no text; a notice was posted.
    EmptyMessage,
    /// Translations posted as a threaded reply.
    Replied,
    /// Reply refused by the platform; translations posted as a plain message.
    RepliedInChannel,
    /// Translations composed but could not be delivered.
    SendFailed,
    /// Something unexpected failed; an apology was posted.
    Apologized,
}

/// Turns flag reactions into translation replies.
pub struct ReactionHandler {
    channel: Arc<dyn Channel>,
    translator: Arc<dyn Translator>,
    settings: HandlerSettings,
}

impl ReactionHandler {
    pub fn new(
        channel: Arc<dyn Channel>,
        translator: Arc<dyn Translator>,
        settings: HandlerSettings,
    ) -> Self {
        Self {
            channel,
            translator,
            settings,
        }
    }

    /// Handle one reaction-added event.
    pub async fn handle(&self, event: ReactionEvent) -> Outcome {
        match self.process(&event).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_missing_entity() => {
                debug!(
                    "reaction {} on message {}: entity unavailable: {e}",
                    event.emoji, event.message_id
                );
                Outcome::EntityMissing
            }
            Err(e) => {
                error!(
                    "reaction {} on message {} failed: {e}",
                    event.emoji, event.message_id
                );
                self.notify(event.channel_id, &apology_notice(&mention(event.user_id)))
                    .await;
                Outcome::Apologized
            }
        }
    }

    async fn process(&self, event: &ReactionEvent) -> Result<Outcome, BabelError> {
        // --- 1. IGNORE OUR OWN REACTIONS ---
        if self.channel.bot_user_id() == Some(event.user_id) {
            return Ok(Outcome::IgnoredSelf);
        }

        // --- 2. FLAG LOOKUP (before any platform call) ---
        let Some(targets) = languages_for_flag(&event.emoji) else {
            return Ok(Outcome::UnknownEmoji);
        };

        // --- 3. REQUESTER ---
        let user = self.channel.fetch_user(event.user_id).await?;
        if user.is_bot {
            debug!("ignoring reaction {} from bot {}", event.emoji, user.id);
            return Ok(Outcome::IgnoredBot);
        }

        info!(
            "[{}] {} reacted {} on message {}",
            self.channel.name(),
            user.name,
            event.emoji,
            event.message_id
        );

        // --- 4. MESSAGE TEXT ---
        let text = match event
            .cached_content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
        {
            Some(cached) => cached.to_string(),
            None => {
                self.channel
                    .fetch_message(event.channel_id, event.message_id)
                    .await?
                    .content
            }
        };

        if text.trim().is_empty() {
            self.notify(event.channel_id, &empty_message_notice(&user.mention()))
                .await;
            return Ok(Outcome::EmptyMessage);
        }

        // --- 5. DETECT SOURCE ---
        let source = detect_source(
            self.translator.as_ref(),
            &text,
            self.settings.detect_prefix_chars,
        )
        .await;

        // --- 6. TRANSLATE ---
        let slots = translate_targets(
            self.translator.clone(),
            Arc::from(text.as_str()),
            source.as_deref(),
            targets,
        )
        .await;

        // --- 7. COMPOSE ---
        let body = compose_reply(&event.emoji, &user.mention(), source.as_deref(), &slots);

        // --- 8. DELIVER ---
        let reply = OutgoingMessage::reply(event.channel_id, event.message_id, body);
        Ok(self.deliver(reply).await)
    }

    /// Send as a threaded reply, falling back once to a plain message.
    async fn deliver(&self, reply: OutgoingMessage) -> Outcome {
        match self.channel.send(reply.clone()).await {
            Ok(()) => Outcome::Replied,
            Err(BabelError::ReplyRejected(reason)) => {
                debug!("reply rejected ({reason}), sending to channel instead");
                match self.channel.send(reply.into_plain()).await {
                    Ok(()) => Outcome::RepliedInChannel,
                    Err(e) => {
                        warn!("fallback send failed: {e}");
                        Outcome::SendFailed
                    }
                }
            }
            Err(e) => {
                warn!("failed to send translation reply: {e}");
                Outcome::SendFailed
            }
        }
    }

    async fn notify(&self, channel_id: u64, text: &str) {
        if let Err(e) = self
            .channel
            .send_transient(channel_id, text, self.settings.notice_ttl)
            .await
        {
            warn!("failed to send notice: {e}");
        }
    }
}
