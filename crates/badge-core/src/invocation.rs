//! Inbound command events and per-invocation state.

use std::collections::HashMap;
use std::time::Duration;

use crate::command::{Command, OptionKind};
use crate::error::{HandlerError, Result};

/// A typed option value delivered with a command.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl ArgValue {
    fn kind(&self) -> OptionKind {
        match self {
            ArgValue::String(_) => OptionKind::String,
            ArgValue::Integer(_) => OptionKind::Integer,
            ArgValue::Number(_) => OptionKind::Number,
            ArgValue::Boolean(_) => OptionKind::Boolean,
        }
    }
}

/// Option name to value mapping for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, ArgValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style insert of a string option.
    pub fn with_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, ArgValue::String(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// String option, if present and a string.
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// String option that must be present.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(ArgValue::String(s)) => Ok(s.as_str()),
            Some(_) => Err(HandlerError::InvalidArgument {
                name: name.to_string(),
                expected: OptionKind::String.label(),
            }),
            None => Err(HandlerError::MissingArgument(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A "command invoked" event as delivered by the platform shim.
#[derive(Debug, Clone, Default)]
pub struct InboundCommand {
    pub name: String,
    pub arguments: Arguments,
    /// Display tag of the invoking user, for logs.
    pub invoker: String,
    /// Gateway heartbeat round-trip at the time of the event.
    pub latency: Option<Duration>,
}

impl InboundCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_invoker(mut self, invoker: impl Into<String>) -> Self {
        self.invoker = invoker.into();
        self
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }
}

/// Whether a terminal response has been issued for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Unsent,
    /// Acknowledged; the reply will arrive as a follow-up.
    Deferred,
    Sent,
}

impl ReplyState {
    /// `Deferred` and `Sent` both mean the platform has been answered.
    pub fn is_acknowledged(self) -> bool {
        !matches!(self, ReplyState::Unsent)
    }
}

/// One user triggering one registered command.
#[derive(Debug, Clone)]
pub struct Invocation {
    command: Command,
    arguments: Arguments,
    invoker: String,
    latency: Option<Duration>,
    reply_state: ReplyState,
}

impl Invocation {
    pub fn new(command: Command, inbound: InboundCommand) -> Self {
        Self {
            command,
            arguments: inbound.arguments,
            invoker: inbound.invoker,
            latency: inbound.latency,
            reply_state: ReplyState::Unsent,
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn invoker(&self) -> &str {
        &self.invoker
    }

    pub fn latency(&self) -> Option<Duration> {
        self.latency
    }

    pub fn reply_state(&self) -> ReplyState {
        self.reply_state
    }

    pub(crate) fn set_reply_state(&mut self, state: ReplyState) {
        self.reply_state = state;
    }

    /// Check arguments against the command's schema.
    pub fn validate(&self) -> Result<()> {
        for option in self.command.spec().options {
            match self.arguments.get(option.name) {
                Some(value) if value.kind() != option.kind => {
                    return Err(HandlerError::InvalidArgument {
                        name: option.name.to_string(),
                        expected: option.kind.label(),
                    });
                }
                Some(_) => {}
                None if option.required => {
                    return Err(HandlerError::MissingArgument(option.name.to_string()));
                }
                None => {}
            }
        }
        Ok(())
    }
}
