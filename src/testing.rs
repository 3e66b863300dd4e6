//! In-process `Channel` and `Translator` doubles for handler and gateway tests.

use async_trait::async_trait;
use babel_core::{
    error::BabelError,
    message::{Delivery, InboundEvent, OutgoingMessage, SourceMessage, UserProfile},
    traits::{Channel, Translator},
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Mock channel
// ---------------------------------------------------------------------------

/// Records every platform call; fetch results come from in-memory maps.
#[derive(Default)]
pub struct MockChannel {
    pub bot_id: Option<u64>,
    pub users: HashMap<u64, UserProfile>,
    pub messages: HashMap<u64, SourceMessage>,
    /// Error returned by every `fetch_message` call.
    pub fetch_error: Option<fn() -> BabelError>,
    /// Refuse threaded replies with `ReplyRejected`.
    pub reject_replies: bool,
    /// Fail every `send` with a generic channel error.
    pub fail_send: bool,
    /// Fail plain (non-reply) sends with a generic channel error.
    pub fail_plain: bool,
    /// Every message handed to `send`, delivered or not.
    pub attempts: Mutex<Vec<OutgoingMessage>>,
    pub sent: Mutex<Vec<OutgoingMessage>>,
    pub transients: Mutex<Vec<(u64, String)>>,
    pub user_fetches: Mutex<Vec<u64>>,
    pub message_fetches: Mutex<Vec<(u64, u64)>>,
    pub stopped: Mutex<bool>,
    events: Mutex<Option<mpsc::Receiver<InboundEvent>>>,
}

impl MockChannel {
    pub fn new(bot_id: u64) -> Self {
        Self {
            bot_id: Some(bot_id),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, id: u64, name: &str, is_bot: bool) -> Self {
        self.users.insert(
            id,
            UserProfile {
                id,
                name: name.to_string(),
                is_bot,
            },
        );
        self
    }

    pub fn with_message(mut self, channel_id: u64, id: u64, content: &str) -> Self {
        self.messages.insert(
            id,
            SourceMessage {
                id,
                channel_id,
                author_id: 1,
                content: content.to_string(),
            },
        );
        self
    }

    /// Events handed out by `start`.
    pub fn with_events(self, rx: mpsc::Receiver<InboundEvent>) -> Self {
        *self.events.lock().unwrap() = Some(rx);
        self
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<OutgoingMessage> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn transients(&self) -> Vec<(u64, String)> {
        self.transients.lock().unwrap().clone()
    }

    /// Total platform fetches of either kind.
    pub fn fetch_count(&self) -> usize {
        self.user_fetches.lock().unwrap().len() + self.message_fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl Channel for MockChannel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&self) -> Result<mpsc::Receiver<InboundEvent>, BabelError> {
        match self.events.lock().unwrap().take() {
            Some(rx) => Ok(rx),
            None => {
                let (_tx, rx) = mpsc::channel(1);
                Ok(rx)
            }
        }
    }

    fn bot_user_id(&self) -> Option<u64> {
        self.bot_id
    }

    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<SourceMessage, BabelError> {
        self.message_fetches
            .lock()
            .unwrap()
            .push((channel_id, message_id));
        if let Some(make_err) = self.fetch_error {
            return Err(make_err());
        }
        self.messages
            .get(&message_id)
            .cloned()
            .ok_or_else(|| BabelError::NotFound(format!("message {message_id}")))
    }

    async fn fetch_user(&self, user_id: u64) -> Result<UserProfile, BabelError> {
        self.user_fetches.lock().unwrap().push(user_id);
        self.users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| BabelError::NotFound(format!("user {user_id}")))
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), BabelError> {
        self.attempts.lock().unwrap().push(message.clone());
        if self.fail_send {
            return Err(BabelError::Channel("connection reset".into()));
        }
        match message.delivery {
            Delivery::ReplyTo(_) if self.reject_replies => {
                return Err(BabelError::ReplyRejected(
                    "cannot reply without history".into(),
                ));
            }
            Delivery::Channel if self.fail_plain => {
                return Err(BabelError::Channel("missing permissions".into()));
            }
            _ => {}
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn send_transient(
        &self,
        channel_id: u64,
        text: &str,
        _ttl: Duration,
    ) -> Result<(), BabelError> {
        self.transients
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(())
    }

    async fn latency(&self) -> Result<Duration, BabelError> {
        Ok(Duration::from_millis(42))
    }

    async fn stop(&self) -> Result<(), BabelError> {
        *self.stopped.lock().unwrap() = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mock translator
// ---------------------------------------------------------------------------

/// Canned detection and per-target translations.
#[derive(Default)]
pub struct MockTranslator {
    /// `Ok(code)` or `Err(())` for a detection failure.
    pub detected: Option<Result<String, ()>>,
    pub translations: HashMap<String, String>,
    pub failing: Vec<String>,
    /// `(source, target)` of every translate call.
    pub calls: Mutex<Vec<(String, String)>>,
    pub detect_inputs: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn detecting(code: &str) -> Self {
        Self {
            detected: Some(Ok(code.to_string())),
            ..Default::default()
        }
    }

    pub fn failing_detection() -> Self {
        Self {
            detected: Some(Err(())),
            ..Default::default()
        }
    }

    pub fn with(mut self, target: &str, text: &str) -> Self {
        self.translations
            .insert(target.to_string(), text.to_string());
        self
    }

    pub fn failing_for(mut self, target: &str) -> Self {
        self.failing.push(target.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn detect(&self, text: &str) -> Result<String, BabelError> {
        self.detect_inputs.lock().unwrap().push(text.to_string());
        match &self.detected {
            Some(Ok(code)) => Ok(code.clone()),
            Some(Err(())) => Err(BabelError::Detection("service unavailable".into())),
            None => Ok(String::new()),
        }
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, BabelError> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_string(), target.to_string()));
        if self.failing.iter().any(|t| t == target) {
            return Err(BabelError::Translation(format!("503 for {target}")));
        }
        Ok(self
            .translations
            .get(target)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }

    async fn is_available(&self) -> bool {
        true
    }
}
