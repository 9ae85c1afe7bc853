//! Capabilities handed to command handlers.

use std::sync::Arc;

use tracing::debug;

use crate::error::{ReplyError, WebhookError};
use crate::invocation::{Invocation, ReplyState};
use crate::payload::{OutboundPayload, Visibility};
use crate::random::{RandomSource, ThreadRandom};
use crate::reply::ReplyChannel;
use crate::webhook::{WebhookGateway, WebhookInfo, WebhookSettings};

/// Process-wide dependencies shared by every invocation. Read-only.
#[derive(Clone)]
pub struct Services {
    pub random: Arc<dyn RandomSource>,
    pub webhook: Arc<dyn WebhookGateway>,
    pub webhook_settings: WebhookSettings,
}

impl Services {
    /// Services with the thread RNG.
    pub fn new(webhook: Arc<dyn WebhookGateway>, webhook_settings: WebhookSettings) -> Self {
        Self {
            random: Arc::new(ThreadRandom),
            webhook,
            webhook_settings,
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Resolve the configured target and post `payload` to it.
    ///
    /// Missing or malformed configuration fails before the gateway is touched.
    pub async fn deliver(&self, payload: OutboundPayload) -> Result<(), WebhookError> {
        let target = self.webhook_settings.target()?;
        self.webhook.send(&target, payload).await
    }

    /// Resolve the configured target and fetch its metadata.
    pub async fn webhook_info(&self) -> Result<WebhookInfo, WebhookError> {
        let target = self.webhook_settings.target()?;
        self.webhook.fetch_info(&target).await
    }
}

/// Everything a handler may touch while serving one invocation.
pub struct HandlerContext<'a> {
    pub invocation: &'a mut Invocation,
    pub services: &'a Services,
    channel: &'a dyn ReplyChannel,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        invocation: &'a mut Invocation,
        services: &'a Services,
        channel: &'a dyn ReplyChannel,
    ) -> Self {
        Self {
            invocation,
            services,
            channel,
        }
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.services.random.as_ref()
    }

    /// Send the terminal reply for this invocation.
    ///
    /// A second reply is rejected without reaching the platform. The state
    /// only moves to `Sent` once the channel accepted the payload.
    pub async fn reply(&mut self, payload: OutboundPayload) -> Result<(), ReplyError> {
        match self.invocation.reply_state() {
            ReplyState::Unsent => self.channel.respond(payload).await?,
            ReplyState::Deferred => self.channel.follow_up(payload).await?,
            ReplyState::Sent => return Err(ReplyError::AlreadyReplied),
        }
        self.invocation.set_reply_state(ReplyState::Sent);
        debug!(command = %self.invocation.command(), "Reply sent");
        Ok(())
    }

    /// Acknowledge the invocation; the reply follows later.
    pub async fn defer(&mut self, visibility: Visibility) -> Result<(), ReplyError> {
        if self.invocation.reply_state().is_acknowledged() {
            return Err(ReplyError::AlreadyAcknowledged);
        }
        self.channel.defer(visibility).await?;
        self.invocation.set_reply_state(ReplyState::Deferred);
        Ok(())
    }
}
