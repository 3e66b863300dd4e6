//! Gateway — the main event loop connecting the channel to the handlers.

use crate::commands::{self, Command};
use crate::handler::ReactionHandler;
use babel_core::{
    message::{CommandMessage, InboundEvent, OutgoingMessage},
    traits::Channel,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Routes inbound platform events to the reaction handler and commands.
pub struct Gateway {
    channel: Arc<dyn Channel>,
    handler: Arc<ReactionHandler>,
    command_prefix: String,
    uptime: Instant,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        channel: Arc<dyn Channel>,
        handler: Arc<ReactionHandler>,
        command_prefix: String,
    ) -> Self {
        Self {
            channel,
            handler,
            command_prefix,
            uptime: Instant::now(),
        }
    }

    /// Run the main event loop until ctrl-c or the channel closes.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel {}: {e}", self.channel.name()))?;

        info!(
            "Babel gateway running | channel: {} | prefix: {}",
            self.channel.name(),
            self.command_prefix
        );

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else {
                        warn!("channel event stream closed");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.dispatch(event).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Handle one inbound event to completion.
    pub async fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::Reaction(reaction) => {
                let outcome = self.handler.handle(reaction).await;
                debug!("reaction handled: {outcome:?}");
            }
            InboundEvent::Command(msg) => self.handle_command(msg).await,
        }
    }

    async fn handle_command(&self, msg: CommandMessage) {
        let Some(cmd) = Command::parse(&msg.text, &self.command_prefix) else {
            debug!("unknown command: {}", msg.text);
            return;
        };

        let response = commands::handle(cmd, self.channel.as_ref(), &self.command_prefix).await;
        if let Err(e) = self
            .channel
            .send(OutgoingMessage::plain(msg.channel_id, response))
            .await
        {
            warn!("failed to send command response: {e}");
        }
    }

    /// Graceful shutdown: stop the channel.
    async fn shutdown(&self) {
        info!("Shutting down...");
        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!(
            "Babel shut down cleanly after {}s",
            self.uptime.elapsed().as_secs()
        );
    }
}
