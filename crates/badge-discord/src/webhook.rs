//! Discord webhook REST client.
//!
//! Implements [`WebhookGateway`] with two calls against
//! `{api_base}/webhooks/{id}/{token}`: `POST` to execute and `GET` to read
//! the webhook's metadata. Neither needs bot authentication.

use async_trait::async_trait;
use badge_core::{Embed, OutboundPayload, WebhookError, WebhookGateway, WebhookInfo, WebhookTarget};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Discord REST API base.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Webhook gateway over Discord's REST API.
#[derive(Clone)]
pub struct DiscordWebhookClient {
    client: reqwest::Client,
    api_base: String,
}

impl Default for DiscordWebhookClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl DiscordWebhookClient {
    /// Create a client against the given API base.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, target: &WebhookTarget) -> String {
        format!("{}/webhooks/{}/{}", self.api_base, target.id(), target.token())
    }
}

/// Body of an execute-webhook request.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbedBody>,
}

/// Embed object as Discord expects it.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedBody {
    pub title: String,
    pub description: String,
    pub color: u32,
    /// ISO 8601 timestamp.
    pub timestamp: String,
}

impl From<&Embed> for EmbedBody {
    fn from(embed: &Embed) -> Self {
        Self {
            title: embed.title.clone(),
            description: embed.description.clone(),
            color: embed.color,
            timestamp: embed.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<OutboundPayload> for ExecuteWebhookRequest {
    fn from(payload: OutboundPayload) -> Self {
        Self {
            embeds: payload.embeds.iter().map(EmbedBody::from).collect(),
            content: payload.content,
            username: payload.username,
        }
    }
}

/// Webhook object returned by `GET /webhooks/{id}/{token}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl TryFrom<WebhookResponse> for WebhookInfo {
    type Error = WebhookError;

    fn try_from(response: WebhookResponse) -> Result<Self, Self::Error> {
        let id = response
            .id
            .parse()
            .map_err(|_| WebhookError::Transport(format!("invalid webhook id '{}'", response.id)))?;
        Ok(WebhookInfo {
            id,
            name: response.name,
            channel_id: response.channel_id.and_then(|c| c.parse().ok()),
            has_avatar: response.avatar.is_some(),
        })
    }
}

fn transport(context: &str, e: reqwest::Error) -> WebhookError {
    WebhookError::Transport(format!("{}: {}", context, e))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, WebhookError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(WebhookError::Transport(format!(
        "Discord API error {}: {}",
        status, text
    )))
}

#[async_trait]
impl WebhookGateway for DiscordWebhookClient {
    async fn send(
        &self,
        target: &WebhookTarget,
        payload: OutboundPayload,
    ) -> Result<(), WebhookError> {
        let request = ExecuteWebhookRequest::from(payload);
        trace!("Executing webhook: {:?}", request);

        let response = self
            .client
            .post(self.endpoint(target))
            .json(&request)
            .send()
            .await
            .map_err(|e| transport("HTTP request failed", e))?;
        check_status(response).await?;

        debug!(webhook_id = target.id(), "Webhook executed");
        Ok(())
    }

    async fn fetch_info(&self, target: &WebhookTarget) -> Result<WebhookInfo, WebhookError> {
        let response = self
            .client
            .get(self.endpoint(target))
            .send()
            .await
            .map_err(|e| transport("HTTP request failed", e))?;

        let webhook: WebhookResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| transport("Failed to parse webhook", e))?;

        debug!(webhook_id = %webhook.id, "Webhook info fetched");
        WebhookInfo::try_from(webhook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_request_body_text() {
        let payload = OutboundPayload::text("hello").with_username("Webhook Bot");
        let body = serde_json::to_value(ExecuteWebhookRequest::from(payload)).unwrap();
        assert_eq!(body, json!({ "content": "hello", "username": "Webhook Bot" }));
    }

    #[test]
    fn test_request_body_embed() {
        let mut embed = Embed::new("Title", "Body", 0x0099ff);
        embed.timestamp = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let body = serde_json::to_value(ExecuteWebhookRequest::from(OutboundPayload::embed(embed)))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "embeds": [{
                    "title": "Title",
                    "description": "Body",
                    "color": 0x0099ff,
                    "timestamp": "2024-05-01T12:00:00.000Z"
                }]
            })
        );
    }

    #[test]
    fn test_webhook_response_conversion() {
        let response: WebhookResponse = serde_json::from_value(json!({
            "id": "175928847299117063",
            "type": 1,
            "name": "Announcer",
            "channel_id": "199737254929760256",
            "avatar": null,
            "token": "secret"
        }))
        .unwrap();
        let info = WebhookInfo::try_from(response).unwrap();
        assert_eq!(info.id, 175928847299117063);
        assert_eq!(info.name.as_deref(), Some("Announcer"));
        assert_eq!(info.channel_id, Some(199737254929760256));
        assert!(!info.has_avatar);
    }

    #[test]
    fn test_endpoint() {
        let client = DiscordWebhookClient::new("http://localhost:1234/api/");
        let target = WebhookTarget::parse("https://discord.com/api/webhooks/5/tok").unwrap();
        assert_eq!(client.endpoint(&target), "http://localhost:1234/api/webhooks/5/tok");
    }
}
