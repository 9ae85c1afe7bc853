//! The closed set of commands the bot answers, with their argument schemas.

use crate::payload::Visibility;

/// Type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl OptionKind {
    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            OptionKind::String => "string",
            OptionKind::Integer => "integer",
            OptionKind::Number => "number",
            OptionKind::Boolean => "boolean",
        }
    }
}

/// One option in a command's argument schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

/// Static definition of a command: name, description and ordered options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionSpec],
}

const fn string_option(
    name: &'static str,
    description: &'static str,
    required: bool,
) -> OptionSpec {
    OptionSpec {
        name,
        description,
        kind: OptionKind::String,
        required,
    }
}

const WEBHOOK_SEND_OPTIONS: &[OptionSpec] = &[
    string_option("message", "The message to send", true),
    string_option("username", "Custom username for the webhook", false),
];

const WEBHOOK_EMBED_OPTIONS: &[OptionSpec] = &[
    string_option("title", "Embed title", true),
    string_option("description", "Embed description", true),
    string_option("color", "Embed color (hex code, e.g. #0099ff)", false),
    string_option("username", "Custom username for the webhook", false),
];

/// Bot commands, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Ping,
    Help,
    Roll,
    Coinflip,
    Random,
    WebhookSend,
    WebhookEmbed,
    WebhookInfo,
}

impl Command {
    /// Every command, in help order.
    pub const ALL: [Command; 8] = [
        Command::Ping,
        Command::Help,
        Command::Roll,
        Command::Coinflip,
        Command::Random,
        Command::WebhookSend,
        Command::WebhookEmbed,
        Command::WebhookInfo,
    ];

    /// Wire name as registered on the platform.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Resolve a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Whether this command talks to the configured webhook.
    pub fn is_webhook(self) -> bool {
        matches!(
            self,
            Command::WebhookSend | Command::WebhookEmbed | Command::WebhookInfo
        )
    }

    /// Visibility of every reply this command produces.
    pub fn visibility(self) -> Visibility {
        if self.is_webhook() {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    /// Static definition of this command.
    pub fn spec(self) -> CommandSpec {
        match self {
            Command::Ping => CommandSpec {
                name: "ping",
                description: "Check bot latency",
                options: &[],
            },
            Command::Help => CommandSpec {
                name: "help",
                description: "Show available commands",
                options: &[],
            },
            Command::Roll => CommandSpec {
                name: "roll",
                description: "Roll a dice (1-6)",
                options: &[],
            },
            Command::Coinflip => CommandSpec {
                name: "coinflip",
                description: "Flip a coin",
                options: &[],
            },
            Command::Random => CommandSpec {
                name: "random",
                description: "Generate a random number (1-100)",
                options: &[],
            },
            Command::WebhookSend => CommandSpec {
                name: "webhook-send",
                description: "Send a message via webhook",
                options: WEBHOOK_SEND_OPTIONS,
            },
            Command::WebhookEmbed => CommandSpec {
                name: "webhook-embed",
                description: "Send a rich embed via webhook",
                options: WEBHOOK_EMBED_OPTIONS,
            },
            Command::WebhookInfo => CommandSpec {
                name: "webhook-info",
                description: "Get webhook information",
                options: &[],
            },
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Command::from_name("deploy"), None);
        assert_eq!(Command::from_name("PING"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Command::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Command::ALL.len());
    }

    #[test]
    fn test_visibility() {
        assert_eq!(Command::Ping.visibility(), Visibility::Public);
        assert_eq!(Command::Random.visibility(), Visibility::Public);
        assert_eq!(Command::WebhookSend.visibility(), Visibility::Private);
        assert_eq!(Command::WebhookInfo.visibility(), Visibility::Private);
    }

    #[test]
    fn test_embed_schema() {
        let spec = Command::WebhookEmbed.spec();
        let required: Vec<_> = spec
            .options
            .iter()
            .filter(|o| o.required)
            .map(|o| o.name)
            .collect();
        assert_eq!(required, vec!["title", "description"]);
        assert_eq!(spec.options.len(), 4);
        assert!(spec.options.iter().all(|o| o.kind == OptionKind::String));
    }
}
