//! Webhook target parsing and the gateway seam used by the webhook commands.

use async_trait::async_trait;
use url::Url;

use crate::error::WebhookError;
use crate::payload::OutboundPayload;

/// Discord epoch (2015-01-01T00:00:00Z) in milliseconds.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Id/token pair extracted from a webhook URL.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    id: u64,
    token: String,
}

impl WebhookTarget {
    /// Parse a URL of the form `https://host/.../webhooks/<id>/<token>`.
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| WebhookError::InvalidUrl(format!("not a URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebhookError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let position = segments
            .iter()
            .position(|seg| *seg == "webhooks")
            .ok_or_else(|| WebhookError::InvalidUrl("missing 'webhooks' path segment".into()))?;

        let (id, token) = match &segments[position + 1..] {
            [id, token, ..] => (*id, *token),
            _ => {
                return Err(WebhookError::InvalidUrl(
                    "expected .../webhooks/<id>/<token>".into(),
                ))
            }
        };

        let id: u64 = id
            .parse()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| WebhookError::InvalidUrl(format!("webhook id '{}' is not numeric", id)))?;

        Ok(Self {
            id,
            token: token.to_string(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for WebhookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookTarget")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Metadata about a webhook as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookInfo {
    pub id: u64,
    pub name: Option<String>,
    pub channel_id: Option<u64>,
    pub has_avatar: bool,
}

impl WebhookInfo {
    /// Creation time in Unix seconds, derived from the snowflake id.
    pub fn created_at_secs(&self) -> u64 {
        snowflake_timestamp_secs(self.id)
    }
}

/// Unix seconds encoded in a Discord snowflake.
pub fn snowflake_timestamp_secs(id: u64) -> u64 {
    ((id >> 22) + DISCORD_EPOCH_MS) / 1000
}

/// Sends messages as a named sender to a webhook endpoint.
#[async_trait]
pub trait WebhookGateway: Send + Sync {
    /// Post a message to the webhook.
    async fn send(&self, target: &WebhookTarget, payload: OutboundPayload)
        -> Result<(), WebhookError>;

    /// Fetch the webhook's metadata.
    async fn fetch_info(&self, target: &WebhookTarget) -> Result<WebhookInfo, WebhookError>;
}

/// The configured webhook URL, if any. Loaded once at startup.
#[derive(Clone, Default)]
pub struct WebhookSettings {
    url: Option<String>,
}

impl WebhookSettings {
    /// Blank URLs count as not configured.
    pub fn new(url: Option<String>) -> Self {
        Self {
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Resolve the configured URL into a target.
    pub fn target(&self) -> Result<WebhookTarget, WebhookError> {
        let url = self.url.as_deref().ok_or(WebhookError::NotConfigured)?;
        WebhookTarget::parse(url)
    }
}

impl std::fmt::Debug for WebhookSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSettings")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discord_url() {
        let target =
            WebhookTarget::parse("https://discord.com/api/webhooks/123456789012345678/abc-DEF_ghi")
                .unwrap();
        assert_eq!(target.id(), 123456789012345678);
        assert_eq!(target.token(), "abc-DEF_ghi");
    }

    #[test]
    fn test_parse_versioned_url_with_query() {
        let target =
            WebhookTarget::parse("https://discord.com/api/v10/webhooks/42/tok/?wait=true").unwrap();
        assert_eq!(target.id(), 42);
        assert_eq!(target.token(), "tok");
    }

    #[test]
    fn test_parse_failures() {
        for raw in [
            "not a url",
            "ftp://discord.com/api/webhooks/1/tok",
            "https://discord.com/api/channels/1/tok",
            "https://discord.com/api/webhooks/123",
            "https://discord.com/api/webhooks/abc/tok",
            "https://discord.com/api/webhooks/0/tok",
            "https://discord.com/api/webhooks/",
        ] {
            let result = WebhookTarget::parse(raw);
            assert!(
                matches!(result, Err(WebhookError::InvalidUrl(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let target = WebhookTarget::parse("https://discord.com/api/webhooks/1/secret").unwrap();
        let debug = format!("{:?}", target);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_settings() {
        assert!(matches!(
            WebhookSettings::new(None).target(),
            Err(WebhookError::NotConfigured)
        ));
        assert!(!WebhookSettings::new(Some("   ".into())).is_configured());
        assert!(matches!(
            WebhookSettings::new(Some("garbage".into())).target(),
            Err(WebhookError::InvalidUrl(_))
        ));
        let settings = WebhookSettings::new(Some("https://discord.com/api/webhooks/7/t".into()));
        assert_eq!(settings.target().unwrap().id(), 7);
    }

    #[test]
    fn test_snowflake_timestamp() {
        // Id from the Discord developer docs, created 2016-04-30T11:18:25.796Z.
        assert_eq!(snowflake_timestamp_secs(175928847299117063), 1462015105);
        assert_eq!(snowflake_timestamp_secs(0), DISCORD_EPOCH_MS / 1000);
    }
}
