//! Conversion between serenity interactions and the core's command model.

use std::time::Duration;

use async_trait::async_trait;
use badge_core::{
    ArgValue, Arguments, Embed, InboundCommand, OutboundPayload, ReplyChannel, ReplyError,
    Visibility,
};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Http, Timestamp,
};

/// Typed argument bag from the interaction's top-level options.
pub fn arguments_from_options(options: &[CommandDataOption]) -> Arguments {
    let mut arguments = Arguments::new();
    for option in options {
        let value = match &option.value {
            CommandDataOptionValue::String(s) => ArgValue::String(s.clone()),
            CommandDataOptionValue::Integer(i) => ArgValue::Integer(*i),
            CommandDataOptionValue::Number(n) => ArgValue::Number(*n),
            CommandDataOptionValue::Boolean(b) => ArgValue::Boolean(*b),
            // Subcommands, mentions and attachments are not part of any schema.
            _ => continue,
        };
        arguments.insert(option.name.clone(), value);
    }
    arguments
}

/// Build the core's inbound event from a command interaction.
pub fn inbound_command(interaction: &CommandInteraction, latency: Option<Duration>) -> InboundCommand {
    InboundCommand::new(interaction.data.name.clone())
        .with_arguments(arguments_from_options(&interaction.data.options))
        .with_invoker(interaction.user.tag())
        .with_latency(latency)
}

/// Convert a core embed into a serenity builder.
pub fn create_embed(embed: &Embed) -> CreateEmbed {
    let builder = CreateEmbed::new()
        .title(embed.title.clone())
        .description(embed.description.clone())
        .colour(embed.color);
    match Timestamp::from_unix_timestamp(embed.timestamp.timestamp()) {
        Ok(timestamp) => builder.timestamp(timestamp),
        Err(_) => builder,
    }
}

fn response_message(payload: &OutboundPayload) -> CreateInteractionResponseMessage {
    let mut message = CreateInteractionResponseMessage::new()
        .ephemeral(payload.visibility.is_private());
    if let Some(content) = &payload.content {
        message = message.content(content.clone());
    }
    if !payload.embeds.is_empty() {
        message = message.embeds(payload.embeds.iter().map(create_embed).collect());
    }
    message
}

fn followup_message(payload: &OutboundPayload) -> CreateInteractionResponseFollowup {
    let mut message = CreateInteractionResponseFollowup::new()
        .ephemeral(payload.visibility.is_private());
    if let Some(content) = &payload.content {
        message = message.content(content.clone());
    }
    if !payload.embeds.is_empty() {
        message = message.embeds(payload.embeds.iter().map(create_embed).collect());
    }
    message
}

fn transport(e: serenity::Error) -> ReplyError {
    ReplyError::Transport(e.to_string())
}

/// Replies to one command interaction over the Discord HTTP API.
pub struct InteractionReply<'a> {
    http: &'a Http,
    interaction: &'a CommandInteraction,
}

impl<'a> InteractionReply<'a> {
    pub fn new(http: &'a Http, interaction: &'a CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl<'a> ReplyChannel for InteractionReply<'a> {
    async fn respond(&self, payload: OutboundPayload) -> Result<(), ReplyError> {
        let response = CreateInteractionResponse::Message(response_message(&payload));
        self.interaction
            .create_response(self.http, response)
            .await
            .map_err(transport)
    }

    async fn defer(&self, visibility: Visibility) -> Result<(), ReplyError> {
        let message = CreateInteractionResponseMessage::new().ephemeral(visibility.is_private());
        self.interaction
            .create_response(self.http, CreateInteractionResponse::Defer(message))
            .await
            .map_err(transport)
    }

    async fn follow_up(&self, payload: OutboundPayload) -> Result<(), ReplyError> {
        self.interaction
            .create_followup(self.http, followup_message(&payload))
            .await
            .map(|_| ())
            .map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(value: serde_json::Value) -> CommandDataOption {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_arguments_from_options() {
        let options = vec![
            option(json!({ "name": "message", "type": 3, "value": "hello" })),
            option(json!({ "name": "count", "type": 4, "value": 3 })),
            option(json!({ "name": "loud", "type": 5, "value": true })),
        ];
        let args = arguments_from_options(&options);
        assert_eq!(args.str("message"), Some("hello"));
        assert_eq!(args.get("count"), Some(&ArgValue::Integer(3)));
        assert_eq!(args.get("loud"), Some(&ArgValue::Boolean(true)));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_arguments_empty() {
        assert!(arguments_from_options(&[]).is_empty());
    }
}
