//! Maps an inbound command to exactly one handler and guarantees a reply.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::context::{HandlerContext, Services};
use crate::error::{HandlerError, Result};
use crate::handlers;
use crate::invocation::{InboundCommand, Invocation, ReplyState};
use crate::payload::OutboundPayload;
use crate::reply::ReplyChannel;

/// Generic reply sent when a handler fails before replying.
pub const GENERIC_ERROR_REPLY: &str = "❌ An error occurred while executing this command.";

/// Something that can serve an invocation.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, cx: &mut HandlerContext<'_>) -> Result<()>;
}

#[async_trait]
impl CommandHandler for Command {
    async fn run(&self, cx: &mut HandlerContext<'_>) -> Result<()> {
        match self {
            Command::Ping => handlers::ping(cx).await,
            Command::Help => handlers::help(cx).await,
            Command::Roll => handlers::roll(cx).await,
            Command::Coinflip => handlers::coinflip(cx).await,
            Command::Random => handlers::random(cx).await,
            Command::WebhookSend => handlers::webhook_send(cx).await,
            Command::WebhookEmbed => handlers::webhook_embed(cx).await,
            Command::WebhookInfo => handlers::webhook_info(cx).await,
        }
    }
}

/// Dispatches inbound commands. Holds no per-invocation state.
#[derive(Clone)]
pub struct CommandRouter {
    services: Services,
}

impl CommandRouter {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Handle one inbound command. Never fails; unknown names are ignored.
    pub async fn handle(&self, inbound: InboundCommand, channel: &dyn ReplyChannel) {
        let Some(command) = Command::from_name(&inbound.name) else {
            debug!(name = %inbound.name, "Ignoring unknown command");
            return;
        };

        info!(command = %command, invoker = %inbound.invoker, "Command invoked");
        let invocation = Invocation::new(command, inbound);
        let state = self.run_guarded(invocation, channel, &command).await;
        debug!(command = %command, state = ?state, "Command finished");
    }

    /// Run `handler` inside the failure boundary.
    ///
    /// Errors and panics are logged. If the invocation has not been
    /// acknowledged (neither sent nor deferred), a generic private error
    /// reply is sent. Returns the final reply state.
    pub async fn run_guarded(
        &self,
        mut invocation: Invocation,
        channel: &dyn ReplyChannel,
        handler: &dyn CommandHandler,
    ) -> ReplyState {
        let command = invocation.command();

        let outcome = {
            let mut cx = HandlerContext::new(&mut invocation, &self.services, channel);
            AssertUnwindSafe(handler.run(&mut cx))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(HandlerError::Panicked(panic_message(&*panic))))
        };

        let Err(e) = outcome else {
            return invocation.reply_state();
        };

        error!(command = %command, error = %e, "Error handling command");

        if invocation.reply_state().is_acknowledged() {
            warn!(
                command = %command,
                state = ?invocation.reply_state(),
                "Handler failed after responding; skipping error reply"
            );
            return invocation.reply_state();
        }

        let mut cx = HandlerContext::new(&mut invocation, &self.services, channel);
        if let Err(reply_err) = cx
            .reply(OutboundPayload::text(GENERIC_ERROR_REPLY).private())
            .await
        {
            error!(command = %command, error = %reply_err, "Failed to send error reply");
        }
        invocation.reply_state()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
