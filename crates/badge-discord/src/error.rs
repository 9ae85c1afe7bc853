//! Error types for the Discord shim.

use thiserror::Error;

/// Errors that can occur while starting or running the bot.
#[derive(Debug, Error)]
pub enum DiscordError {
    /// Bot token not provided.
    #[error("Discord bot token not set. Set DISCORD_BOT_TOKEN environment variable.")]
    NoToken,

    /// Discord rejected the token.
    #[error("Failed to authenticate with Discord: {0}")]
    Authentication(String),

    /// Gateway client could not be built or stopped with an error.
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// Result type for Discord shim operations.
pub type Result<T> = std::result::Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    fn from(e: serenity::Error) -> Self {
        DiscordError::Gateway(e.to_string())
    }
}
