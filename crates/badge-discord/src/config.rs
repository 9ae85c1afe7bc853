//! Startup configuration.
//!
//! Values are read once from the environment. Before that, `.env` files are
//! loaded from the bot's config directory and then the working directory.
//!
//! # Environment Variables
//!
//! - `DISCORD_BOT_TOKEN`: Bot token (required)
//! - `DISCORD_WEBHOOK_URL`: Webhook used by the `/webhook-*` commands (optional)
//! - `DISCORD_API_BASE`: REST API base for webhook calls (default: `https://discord.com/api/v10`)
//! - `BADGE_BOT_CONFIG_DIR`: Override the config directory

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DiscordError, Result};
use crate::webhook::DEFAULT_API_BASE;

/// Environment variable holding the bot token.
pub const BOT_TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Environment variable overriding the REST API base.
pub const API_BASE_ENV: &str = "DISCORD_API_BASE";

/// Environment variable for a custom config directory.
pub const CONFIG_DIR_ENV: &str = "BADGE_BOT_CONFIG_DIR";

/// Directory name under the platform config dir.
const APP_DIR: &str = "badge-bot";

/// Get the config directory.
///
/// 1. `BADGE_BOT_CONFIG_DIR` if set
/// 2. `<platform config dir>/badge-bot`
/// 3. `.badge-bot` in the current directory as fallback
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
        })
}

/// Path of the `.env` file in the config directory.
pub fn env_file() -> PathBuf {
    config_dir().join(".env")
}

/// Load one env file. Existing variables are not overridden.
pub fn load_env_file(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            true
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to load env file");
            false
        }
    }
}

/// Load the config-dir env file, then `.env.local` or `.env` from the
/// working directory.
pub fn load_env_files() {
    load_env_file(&env_file());
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());
}

/// Resolved bot configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// Platform credential.
    pub token: String,
    /// Webhook URL; `None` disables the webhook commands.
    pub webhook_url: Option<String>,
    /// REST API base used for webhook calls.
    pub api_base: String,
}

impl BotConfig {
    /// Build a config. A missing or blank token is an error; a blank webhook
    /// URL counts as not configured.
    pub fn new(token: Option<String>, webhook_url: Option<String>) -> Result<Self> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(DiscordError::NoToken)?;

        let webhook_url = webhook_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Ok(Self {
            token,
            webhook_url,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        if !api_base.trim().is_empty() {
            self.api_base = api_base.trim().trim_end_matches('/').to_string();
        }
        self
    }

    pub fn has_webhook(&self) -> bool {
        self.webhook_url.is_some()
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("webhook_configured", &self.has_webhook())
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_token() {
        assert!(matches!(BotConfig::new(None, None), Err(DiscordError::NoToken)));
        assert!(matches!(
            BotConfig::new(Some("   ".into()), None),
            Err(DiscordError::NoToken)
        ));
    }

    #[test]
    fn test_webhook_optional() {
        let config = BotConfig::new(Some(" token ".into()), Some("".into())).unwrap();
        assert_eq!(config.token, "token");
        assert!(!config.has_webhook());
        assert_eq!(config.api_base, DEFAULT_API_BASE);

        let config = BotConfig::new(
            Some("token".into()),
            Some("https://discord.com/api/webhooks/1/t".into()),
        )
        .unwrap();
        assert!(config.has_webhook());
    }

    #[test]
    fn test_api_base_override() {
        let config = BotConfig::new(Some("token".into()), None)
            .unwrap()
            .with_api_base("http://127.0.0.1:9000/api/");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/api");

        let config = config.with_api_base("  ");
        assert_eq!(config.api_base, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::new(Some("super-secret".into()), None).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_load_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "BADGE_BOT_TEST_ENV_FILE_VALUE=loaded").unwrap();

        assert!(load_env_file(&path));
        assert_eq!(
            std::env::var("BADGE_BOT_TEST_ENV_FILE_VALUE").as_deref(),
            Ok("loaded")
        );
        assert!(!load_env_file(&dir.path().join("missing.env")));
    }
}
