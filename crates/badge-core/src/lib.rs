//! Command dispatch and reply contract for the badge bot.
//!
//! This crate is platform independent. The platform shim converts its
//! events into [`InboundCommand`]s and supplies a [`ReplyChannel`] per
//! invocation; the [`CommandRouter`] resolves the command, runs its handler
//! and guarantees exactly one reply.
//!
//! # Commands
//!
//! - `/ping` - Report gateway latency
//! - `/help` - Show available commands
//! - `/roll` - Roll a dice (1-6)
//! - `/coinflip` - Heads or Tails
//! - `/random` - Random number (1-100)
//! - `/webhook-send` - Send a message through the configured webhook
//! - `/webhook-embed` - Send an embed through the configured webhook
//! - `/webhook-info` - Show the configured webhook's metadata
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use badge_core::{CommandRouter, InboundCommand, Services, WebhookSettings};
//!
//! let services = Services::new(Arc::new(my_gateway), WebhookSettings::new(None));
//! let router = CommandRouter::new(services);
//! router.handle(InboundCommand::new("roll"), &reply_channel).await;
//! ```

pub mod color;
pub mod command;
pub mod context;
pub mod error;
pub mod handlers;
pub mod invocation;
pub mod payload;
pub mod random;
pub mod reply;
pub mod router;
pub mod webhook;

pub use color::{parse_color, ColorError, DEFAULT_EMBED_COLOR};
pub use command::{Command, CommandSpec, OptionKind, OptionSpec};
pub use context::{HandlerContext, Services};
pub use error::{HandlerError, ReplyError, Result, WebhookError};
pub use handlers::{DEFAULT_WEBHOOK_USERNAME, HELP_TEXT};
pub use invocation::{ArgValue, Arguments, InboundCommand, Invocation, ReplyState};
pub use payload::{Embed, OutboundPayload, Visibility};
pub use random::{RandomSource, ThreadRandom};
pub use reply::ReplyChannel;
pub use router::{CommandHandler, CommandRouter, GENERIC_ERROR_REPLY};
pub use webhook::{WebhookGateway, WebhookInfo, WebhookSettings, WebhookTarget};
