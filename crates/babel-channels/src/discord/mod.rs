//! Discord channel.
//!
//! Connects to the Discord gateway through serenity for reaction and message
//! events, and uses the REST client for fetches and sends.
//! Docs: <https://discord.com/developers/docs>

mod errors;
mod events;

use async_trait::async_trait;
use babel_core::{
    config::DiscordConfig,
    error::BabelError,
    message::{Delivery, InboundEvent, OutgoingMessage, SourceMessage, UserProfile},
    traits::Channel,
};
use errors::{classify, Op};
use events::Forwarder;
use serenity::builder::{CreateAllowedMentions, CreateMessage};
use serenity::cache::Settings as CacheSettings;
use serenity::gateway::ShardManager;
use serenity::http::Http;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::{ChannelId, MessageId, UserId};
use serenity::Client;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// Discord's per-message character limit.
const MESSAGE_LIMIT: usize = 2000;

/// Discord channel backed by serenity.
pub struct DiscordChannel {
    config: DiscordConfig,
    http: Arc<Http>,
    /// Set once the gateway reports `READY`.
    bot_user_id: Arc<OnceLock<u64>>,
    shard_manager: Mutex<Option<Arc<ShardManager>>>,
}

impl DiscordChannel {
    /// Create a new Discord channel from config.
    pub fn new(config: DiscordConfig) -> Self {
        let http = Arc::new(Http::new(&config.bot_token));
        Self {
            config,
            http,
            bot_user_id: Arc::new(OnceLock::new()),
            shard_manager: Mutex::new(None),
        }
    }

    fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::DIRECT_MESSAGE_REACTIONS
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Post one message; only the first chunk of a reply carries the reference.
    async fn post(
        &self,
        channel: ChannelId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<serenity::model::channel::Message, BabelError> {
        let mut builder = CreateMessage::new().content(text);
        let op = match reply_to {
            Some(message_id) => {
                builder = builder
                    .reference_message((channel, message_id))
                    .allowed_mentions(
                        CreateAllowedMentions::new()
                            .all_users(true)
                            .replied_user(false),
                    );
                Op::Reply
            }
            None => Op::Send,
        };
        channel
            .send_message(&*self.http, builder)
            .await
            .map_err(|e| classify(op, e))
    }
}

fn channel_id(id: u64) -> Result<ChannelId, BabelError> {
    (id != 0)
        .then(|| ChannelId::new(id))
        .ok_or_else(|| BabelError::NotFound("channel 0".into()))
}

fn message_id(id: u64) -> Result<MessageId, BabelError> {
    (id != 0)
        .then(|| MessageId::new(id))
        .ok_or_else(|| BabelError::NotFound("message 0".into()))
}

fn user_id(id: u64) -> Result<UserId, BabelError> {
    (id != 0)
        .then(|| UserId::new(id))
        .ok_or_else(|| BabelError::NotFound("user 0".into()))
}

/// Post `chunks` in order; only the first carries the reply reference.
///
/// Stops at the first failure. Chunks already posted stay visible.
async fn send_chunks<'a, F, Fut>(
    chunks: Vec<&'a str>,
    reply_to: Option<MessageId>,
    mut post: F,
) -> Result<(), BabelError>
where
    F: FnMut(&'a str, Option<MessageId>) -> Fut,
    Fut: Future<Output = Result<(), BabelError>>,
{
    let total = chunks.len();
    for (i, chunk) in chunks.into_iter().enumerate() {
        let reference = if i == 0 { reply_to } else { None };
        if let Err(e) = post(chunk, reference).await {
            if i > 0 {
                warn!(
                    "discord: chunk {}/{total} failed, {i} earlier chunk(s) stay posted: {e}",
                    i + 1
                );
            }
            return Err(e);
        }
    }
    Ok(())
}

#[async_trait]
impl Channel for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    async fn start(&self) -> Result<mpsc::Receiver<InboundEvent>, BabelError> {
        let (tx, rx) = mpsc::channel(64);
        let forwarder = Forwarder {
            tx,
            command_prefix: self.config.command_prefix.clone(),
            bot_user_id: self.bot_user_id.clone(),
        };

        let mut cache_settings = CacheSettings::default();
        cache_settings.max_messages = self.config.message_cache_size;

        let mut client = Client::builder(&self.config.bot_token, Self::intents())
            .event_handler(forwarder)
            .cache_settings(cache_settings)
            .await
            .map_err(|e| BabelError::Channel(format!("failed to build discord client: {e}")))?;

        *self.shard_manager.lock().await = Some(client.shard_manager.clone());

        info!("Discord channel connecting to gateway...");

        tokio::spawn(async move {
            if let Err(e) = client.start().await {
                error!(
                    "discord gateway stopped: {e}. Check the bot token and that the \
                     Message Content intent is enabled in the Developer Portal."
                );
            }
        });

        Ok(rx)
    }

    fn bot_user_id(&self) -> Option<u64> {
        self.bot_user_id.get().copied()
    }

    async fn fetch_message(
        &self,
        channel_id_raw: u64,
        message_id_raw: u64,
    ) -> Result<SourceMessage, BabelError> {
        let msg = self
            .http
            .get_message(channel_id(channel_id_raw)?, message_id(message_id_raw)?)
            .await
            .map_err(|e| classify(Op::Fetch, e))?;
        Ok(SourceMessage {
            id: msg.id.get(),
            channel_id: msg.channel_id.get(),
            author_id: msg.author.id.get(),
            content: msg.content,
        })
    }

    async fn fetch_user(&self, user_id_raw: u64) -> Result<UserProfile, BabelError> {
        let user = self
            .http
            .get_user(user_id(user_id_raw)?)
            .await
            .map_err(|e| classify(Op::Fetch, e))?;
        Ok(UserProfile {
            id: user.id.get(),
            name: user.name,
            is_bot: user.bot,
        })
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), BabelError> {
        let channel = channel_id(message.channel_id)?;
        let reply_to = match message.delivery {
            Delivery::ReplyTo(id) => Some(message_id(id)?),
            Delivery::Channel => None,
        };

        let chunks = crate::utils::split_message(&message.text, MESSAGE_LIMIT);
        send_chunks(chunks, reply_to, |chunk, reference| async move {
            self.post(channel, chunk, reference).await.map(|_| ())
        })
        .await
    }

    async fn send_transient(
        &self,
        channel_id_raw: u64,
        text: &str,
        ttl: Duration,
    ) -> Result<(), BabelError> {
        let channel = channel_id(channel_id_raw)?;
        let sent = self.post(channel, text, None).await?;

        let http = self.http.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = channel.delete_message(&*http, sent.id).await {
                debug!("discord: failed to delete transient message {}: {e}", sent.id);
            }
        });
        Ok(())
    }

    async fn latency(&self) -> Result<Duration, BabelError> {
        let start = Instant::now();
        self.http
            .get_current_user()
            .await
            .map_err(|e| classify(Op::Fetch, e))?;
        Ok(start.elapsed())
    }

    async fn stop(&self) -> Result<(), BabelError> {
        if let Some(manager) = self.shard_manager.lock().await.take() {
            manager.shutdown_all().await;
        } else {
            warn!("discord: stop called before start");
        }
        info!("Discord channel stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_and_unset_bot_id() {
        let ch = DiscordChannel::new(DiscordConfig::default());
        assert_eq!(ch.name(), "discord");
        assert!(ch.bot_user_id().is_none());
    }

    #[test]
    fn test_zero_ids_are_not_found() {
        assert!(matches!(channel_id(0), Err(BabelError::NotFound(_))));
        assert!(matches!(message_id(0), Err(BabelError::NotFound(_))));
        assert!(matches!(user_id(0), Err(BabelError::NotFound(_))));
        assert_eq!(channel_id(5).unwrap().get(), 5);
    }

    #[tokio::test]
    async fn test_send_chunks_threads_only_first() {
        let posted = std::sync::Mutex::new(Vec::new());
        let result = send_chunks(vec!["a", "b", "c"], Some(MessageId::new(9)), |chunk, r| {
            posted.lock().unwrap().push((chunk, r));
            async { Ok(()) }
        })
        .await;

        assert!(result.is_ok());
        let posted = posted.into_inner().unwrap();
        assert_eq!(
            posted,
            vec![("a", Some(MessageId::new(9))), ("b", None), ("c", None)]
        );
    }

    #[tokio::test]
    async fn test_send_chunks_stops_at_first_failure() {
        let posted = std::sync::Mutex::new(Vec::new());
        let result = send_chunks(vec!["a", "b", "c"], Some(MessageId::new(9)), |chunk, _| {
            posted.lock().unwrap().push(chunk);
            let fail = chunk == "b";
            async move {
                if fail {
                    Err(BabelError::Channel("discord 500".into()))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(matches!(result, Err(BabelError::Channel(_))));
        // The first chunk stays posted; the third is never attempted.
        assert_eq!(posted.into_inner().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_intents_include_reactions_and_content() {
        let intents = DiscordChannel::intents();
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGE_REACTIONS));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }
}
