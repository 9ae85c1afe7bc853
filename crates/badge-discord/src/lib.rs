//! Discord front end for the badge bot.
//!
//! Logs in with a bot token, receives slash-command interactions from the
//! gateway and hands them to [`badge_core::CommandRouter`]. The webhook
//! commands post through [`DiscordWebhookClient`].
//!
//! # Environment Variables
//!
//! Required:
//! - `DISCORD_BOT_TOKEN`: Bot token from the Discord developer portal
//!
//! Optional:
//! - `DISCORD_WEBHOOK_URL`: Webhook for `/webhook-send`, `/webhook-embed`, `/webhook-info`
//! - `DISCORD_API_BASE`: REST API base (default: `https://discord.com/api/v10`)
//!
//! # Example
//!
//! ```no_run
//! use badge_discord::{BadgeBot, BotConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::new(std::env::var("DISCORD_BOT_TOKEN").ok(), None)?;
//!     let bot = BadgeBot::new(config);
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod interaction;
pub mod webhook;

pub use bot::{BadgeBot, Handler};
pub use config::BotConfig;
pub use error::{DiscordError, Result};
pub use interaction::InteractionReply;
pub use webhook::DiscordWebhookClient;
