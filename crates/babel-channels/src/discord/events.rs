//! Gateway event handler: turns serenity events into [`InboundEvent`]s.

use babel_core::message::{CommandMessage, InboundEvent, ReactionEvent};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::{Message, Reaction};
use serenity::model::gateway::Ready;
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Forwards reactions and prefixed messages to the gateway.
pub(super) struct Forwarder {
    pub(super) tx: mpsc::Sender<InboundEvent>,
    pub(super) command_prefix: String,
    pub(super) bot_user_id: Arc<OnceLock<u64>>,
}

impl Forwarder {
    async fn forward(&self, event: InboundEvent) {
        if self.tx.send(event).await.is_err() {
            debug!("discord: gateway receiver dropped, event discarded");
        }
    }
}

/// Whether `text` invokes a command under `prefix`.
pub(super) fn is_command(text: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && text
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_alphanumeric()))
}

/// Whether a message should reach the gateway as a command.
pub(super) fn is_forwardable_command(author_is_bot: bool, text: &str, prefix: &str) -> bool {
    !author_is_bot && is_command(text, prefix)
}

/// Message text from the gateway cache, if the message is cached and has text.
fn cached_content(ctx: &Context, reaction: &Reaction) -> Option<String> {
    ctx.cache
        .message(reaction.channel_id, reaction.message_id)
        .map(|m| m.content.clone())
        .filter(|content| !content.is_empty())
}

#[async_trait]
impl EventHandler for Forwarder {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let _ = self.bot_user_id.set(ready.user.id.get());
        info!(
            "Discord bot logged in as {} (ID: {})",
            ready.user.name, ready.user.id
        );
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(user_id) = reaction.user_id else {
            return;
        };

        debug!(
            "discord: reaction {} by {} on message {} in channel {}",
            reaction.emoji, user_id, reaction.message_id, reaction.channel_id
        );

        let event = ReactionEvent {
            emoji: reaction.emoji.to_string(),
            message_id: reaction.message_id.get(),
            channel_id: reaction.channel_id.get(),
            user_id: user_id.get(),
            guild_id: reaction.guild_id.map(|g| g.get()),
            cached_content: cached_content(&ctx, &reaction),
        };
        self.forward(InboundEvent::Reaction(event)).await;
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        if !is_forwardable_command(msg.author.bot, &msg.content, &self.command_prefix) {
            return;
        }

        let command = CommandMessage {
            message_id: msg.id.get(),
            channel_id: msg.channel_id.get(),
            author_id: msg.author.id.get(),
            text: msg.content,
        };
        self.forward(InboundEvent::Command(command)).await;
    }
}
