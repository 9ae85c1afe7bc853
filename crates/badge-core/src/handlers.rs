//! Command handlers. Each one replies exactly once.

use tracing::{error, info, warn};

use crate::color::{parse_color, DEFAULT_EMBED_COLOR};
use crate::context::HandlerContext;
use crate::error::{Result, WebhookError};
use crate::payload::{Embed, OutboundPayload};
use crate::webhook::WebhookInfo;

/// Sender name used when `username` is not given.
pub const DEFAULT_WEBHOOK_USERNAME: &str = "Webhook Bot";

/// Fixed `/help` reference text.
pub const HELP_TEXT: &str = "📋 **Available Commands**

**Basic Commands:**
`/ping` - Check bot latency
`/help` - Show this help message
`/roll` - Roll a dice (1-6)
`/coinflip` - Flip a coin
`/random` - Generate a random number (1-100)

**Webhook Commands:**
`/webhook-send` - Send a message via webhook
`/webhook-embed` - Send a rich embed via webhook
`/webhook-info` - Get webhook information

💡 **Active Developer Badge**
Use any command to contribute to your Active Developer Badge eligibility!";

pub const WEBHOOK_NOT_CONFIGURED: &str =
    "❌ Webhook URL is not configured! Please set DISCORD_WEBHOOK_URL in the bot's environment.";
const WEBHOOK_SEND_OK: &str = "✅ Message sent via webhook successfully!";
const WEBHOOK_SEND_FAILED: &str = "❌ Failed to send webhook message. Check your webhook URL.";
const WEBHOOK_EMBED_OK: &str = "✅ Embed sent via webhook successfully!";
const WEBHOOK_EMBED_FAILED: &str =
    "❌ Failed to send webhook embed. Check your webhook URL and color format.";
const WEBHOOK_INFO_FAILED: &str = "❌ Failed to fetch webhook info. Check your webhook URL.";

/// Reply with text using the command's visibility.
async fn reply_text(cx: &mut HandlerContext<'_>, text: impl Into<String>) -> Result<()> {
    let visibility = cx.invocation.command().visibility();
    cx.reply(OutboundPayload::text(text).with_visibility(visibility))
        .await?;
    Ok(())
}

/// Optional string argument with blank values treated as absent.
fn optional_arg(cx: &HandlerContext<'_>, name: &str, default: &str) -> String {
    cx.invocation
        .arguments()
        .str(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub(crate) async fn ping(cx: &mut HandlerContext<'_>) -> Result<()> {
    let latency = match cx.invocation.latency() {
        Some(latency) => format!("{}ms", latency.as_millis()),
        None => "measuring...".to_string(),
    };
    reply_text(cx, format!("🏓 Pong! Latency: {}", latency)).await
}

pub(crate) async fn help(cx: &mut HandlerContext<'_>) -> Result<()> {
    reply_text(cx, HELP_TEXT).await
}

pub(crate) async fn roll(cx: &mut HandlerContext<'_>) -> Result<()> {
    let roll = cx.random().int_in_range(1, 6);
    reply_text(cx, format!("🎲 You rolled a **{}**!", roll)).await
}

pub(crate) async fn coinflip(cx: &mut HandlerContext<'_>) -> Result<()> {
    let (result, emoji) = if cx.random().int_in_range(0, 1) == 0 {
        ("Heads", "🪙")
    } else {
        ("Tails", "💿")
    };
    reply_text(cx, format!("{} The coin landed on **{}**!", emoji, result)).await
}

pub(crate) async fn random(cx: &mut HandlerContext<'_>) -> Result<()> {
    let number = cx.random().int_in_range(1, 100);
    reply_text(cx, format!("🎰 Random number: **{}**", number)).await
}

pub(crate) async fn webhook_send(cx: &mut HandlerContext<'_>) -> Result<()> {
    if !cx.services.webhook_settings.is_configured() {
        return reply_text(cx, WEBHOOK_NOT_CONFIGURED).await;
    }
    cx.invocation.validate()?;

    let message = cx.invocation.arguments().require_str("message")?.to_string();
    let username = optional_arg(cx, "username", DEFAULT_WEBHOOK_USERNAME);

    let payload = OutboundPayload::text(message).with_username(username.as_str());
    let text = match cx.services.deliver(payload).await {
        Ok(()) => {
            info!(invoker = %cx.invocation.invoker(), username = %username, "Webhook message sent");
            WEBHOOK_SEND_OK
        }
        Err(e) => {
            error!(error = %e, "Webhook send error");
            failure_text(&e, WEBHOOK_SEND_FAILED)
        }
    };
    reply_text(cx, text).await
}

pub(crate) async fn webhook_embed(cx: &mut HandlerContext<'_>) -> Result<()> {
    if !cx.services.webhook_settings.is_configured() {
        return reply_text(cx, WEBHOOK_NOT_CONFIGURED).await;
    }
    cx.invocation.validate()?;

    let args = cx.invocation.arguments();
    let title = args.require_str("title")?.to_string();
    let description = args.require_str("description")?.to_string();
    let color = optional_arg(cx, "color", DEFAULT_EMBED_COLOR);
    let username = optional_arg(cx, "username", DEFAULT_WEBHOOK_USERNAME);

    let color = match parse_color(&color, cx.random()) {
        Ok(color) => color,
        Err(e) => {
            warn!(error = %e, "Webhook embed error");
            return reply_text(cx, WEBHOOK_EMBED_FAILED).await;
        }
    };

    let payload =
        OutboundPayload::embed(Embed::new(title, description, color)).with_username(username);
    let text = match cx.services.deliver(payload).await {
        Ok(()) => {
            info!(invoker = %cx.invocation.invoker(), color = %format!("#{:06x}", color), "Webhook embed sent");
            WEBHOOK_EMBED_OK
        }
        Err(e) => {
            error!(error = %e, "Webhook embed error");
            failure_text(&e, WEBHOOK_EMBED_FAILED)
        }
    };
    reply_text(cx, text).await
}

pub(crate) async fn webhook_info(cx: &mut HandlerContext<'_>) -> Result<()> {
    if !cx.services.webhook_settings.is_configured() {
        return reply_text(cx, WEBHOOK_NOT_CONFIGURED).await;
    }
    cx.invocation.validate()?;

    match cx.services.webhook_info().await {
        Ok(info) => reply_text(cx, format_webhook_info(&info)).await,
        Err(e) => {
            error!(error = %e, "Webhook info error");
            reply_text(cx, failure_text(&e, WEBHOOK_INFO_FAILED)).await
        }
    }
}

/// User-facing text for a webhook failure.
fn failure_text(err: &WebhookError, failed: &'static str) -> &'static str {
    match err {
        WebhookError::NotConfigured => WEBHOOK_NOT_CONFIGURED,
        WebhookError::InvalidUrl(_) | WebhookError::Transport(_) => failed,
    }
}

/// Render webhook metadata for `/webhook-info`.
pub fn format_webhook_info(info: &WebhookInfo) -> String {
    let channel = info
        .channel_id
        .map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "Unknown".to_string());

    format!(
        "📡 **Webhook Information**\n\n\
        **Name:** {}\n\
        **Channel:** {}\n\
        **ID:** {}\n\
        **Avatar:** {}\n\
        **Created:** <t:{}:R>",
        info.name.as_deref().unwrap_or("Unknown"),
        channel,
        info.id,
        if info.has_avatar { "Set" } else { "Not set" },
        info.created_at_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[test]
    fn test_help_lists_every_command() {
        for command in Command::ALL {
            assert!(
                HELP_TEXT.contains(&format!("/{}", command.name())),
                "help is missing {}",
                command
            );
        }
    }

    #[test]
    fn test_format_webhook_info() {
        let info = WebhookInfo {
            id: 175928847299117063,
            name: Some("Announcer".into()),
            channel_id: Some(42),
            has_avatar: false,
        };
        let text = format_webhook_info(&info);
        assert!(text.contains("**Name:** Announcer"));
        assert!(text.contains("**Channel:** <#42>"));
        assert!(text.contains("**ID:** 175928847299117063"));
        assert!(text.contains("**Avatar:** Not set"));
        assert!(text.contains("<t:1462015105:R>"));
    }

    #[test]
    fn test_format_webhook_info_unknowns() {
        let info = WebhookInfo {
            id: 1,
            name: None,
            channel_id: None,
            has_avatar: true,
        };
        let text = format_webhook_info(&info);
        assert!(text.contains("**Name:** Unknown"));
        assert!(text.contains("**Channel:** Unknown"));
        assert!(text.contains("**Avatar:** Set"));
    }
}
