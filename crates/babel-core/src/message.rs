use serde::{Deserialize, Serialize};

/// A reaction-added notification from the chat platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    /// Emoji glyph as rendered text (e.g. "🇫🇷").
    pub emoji: String,
    pub message_id: u64,
    pub channel_id: u64,
    /// Platform ID of the user who added the reaction.
    pub user_id: u64,
    #[serde(default)]
    pub guild_id: Option<u64>,
    /// Message text when the platform already had it cached.
    /// `None` means the handler must fetch the message.
    #[serde(default)]
    pub cached_content: Option<String>,
}

/// A text message from a human author that starts with the command prefix.
///
/// Channels drop bot-authored messages before building one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub text: String,
}

/// Everything a channel can deliver to the gateway.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    Reaction(ReactionEvent),
    Command(CommandMessage),
}

/// A message fetched from the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMessage {
    pub id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    /// Text content. Empty for embed-only or attachment-only messages.
    pub content: String,
}

/// A platform user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl UserProfile {
    /// Inline mention markup for this user.
    pub fn mention(&self) -> String {
        mention(self.id)
    }
}

/// Inline mention markup for a user ID.
pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}

/// Where an outgoing message goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Plain message in the channel.
    Channel,
    /// Threaded reply to the given message.
    ReplyTo(u64),
}

/// An outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub channel_id: u64,
    pub text: String,
    pub delivery: Delivery,
}

impl OutgoingMessage {
    /// A plain channel message.
    pub fn plain(channel_id: u64, text: impl Into<String>) -> Self {
        Self {
            channel_id,
            text: text.into(),
            delivery: Delivery::Channel,
        }
    }

    /// A threaded reply to `message_id`.
    pub fn reply(channel_id: u64, message_id: u64, text: impl Into<String>) -> Self {
        Self {
            channel_id,
            text: text.into(),
            delivery: Delivery::ReplyTo(message_id),
        }
    }

    /// The same content, re-addressed as a plain channel message.
    pub fn into_plain(self) -> Self {
        Self {
            delivery: Delivery::Channel,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_markup() {
        let user = UserProfile {
            id: 42,
            name: "ana".into(),
            is_bot: false,
        };
        assert_eq!(user.mention(), "<@42>");
        assert_eq!(mention(7), "<@7>");
    }

    #[test]
    fn test_into_plain_keeps_content() {
        let reply = OutgoingMessage::reply(1, 2, "hola");
        let plain = reply.clone().into_plain();
        assert_eq!(plain.delivery, Delivery::Channel);
        assert_eq!(plain.text, reply.text);
        assert_eq!(plain.channel_id, reply.channel_id);
    }

    #[test]
    fn test_reaction_event_defaults_when_missing() {
        let json = r#"{"emoji":"🇫🇷","message_id":1,"channel_id":2,"user_id":3}"#;
        let event: ReactionEvent = serde_json::from_str(json).unwrap();
        assert!(event.guild_id.is_none());
        assert!(event.cached_content.is_none());
    }
}
