use thiserror::Error;

/// Top-level error type for Babel.
#[derive(Debug, Error)]
pub enum BabelError {
    /// Configuration error (missing token, unknown backend, ...).
    #[error("config error: {0}")]
    Config(String),

    /// Generic failure from the chat platform.
    #[error("channel error: {0}")]
    Channel(String),

    /// The requested channel, message, or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The bot lacks permission for the requested operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The platform refused to send the message as a threaded reply.
    #[error("reply rejected: {0}")]
    ReplyRejected(String),

    /// Source-language detection failed.
    #[error("detection error: {0}")]
    Detection(String),

    /// A translation backend call failed.
    #[error("translation error: {0}")]
    Translation(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BabelError {
    /// Whether this error means the target entity is gone or hidden from the bot.
    ///
    /// Such errors abort event handling silently: the message may simply have
    /// been deleted between the reaction and the fetch.
    pub fn is_missing_entity(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Forbidden(_))
    }
}
