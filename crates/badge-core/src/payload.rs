//! Outbound message model shared by interaction replies and webhook sends.

use chrono::{DateTime, Utc};

/// Who can see a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Visible to everyone in the channel.
    #[default]
    Public,
    /// Visible only to the invoking user (ephemeral).
    Private,
}

impl Visibility {
    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

/// A rich embed.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// RGB colour, `0x000000..=0xFFFFFF`.
    pub color: u32,
    pub timestamp: DateTime<Utc>,
}

impl Embed {
    /// Build an embed stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            timestamp: Utc::now(),
        }
    }
}

/// A message to send, either as an interaction reply or through a webhook.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutboundPayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    /// Display name override; only meaningful for webhook sends.
    pub username: Option<String>,
    pub visibility: Visibility,
}

impl OutboundPayload {
    /// A plain text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// A payload carrying a single embed and no text.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn private(self) -> Self {
        self.with_visibility(Visibility::Private)
    }

    pub fn public(self) -> Self {
        self.with_visibility(Visibility::Public)
    }

    /// Text content, or an empty string.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults_public() {
        let payload = OutboundPayload::text("hi");
        assert_eq!(payload.content_str(), "hi");
        assert_eq!(payload.visibility, Visibility::Public);
        assert!(payload.embeds.is_empty());
        assert!(payload.username.is_none());
    }

    #[test]
    fn test_builders() {
        let payload = OutboundPayload::embed(Embed::new("t", "d", 0x0099ff))
            .with_username("Webhook Bot")
            .private();
        assert!(payload.content.is_none());
        assert_eq!(payload.content_str(), "");
        assert_eq!(payload.embeds.len(), 1);
        assert_eq!(payload.username.as_deref(), Some("Webhook Bot"));
        assert!(payload.visibility.is_private());
    }
}
