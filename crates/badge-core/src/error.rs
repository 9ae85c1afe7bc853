//! Error types for command handling.

use thiserror::Error;

/// Errors raised inside a command handler.
///
/// These are recovered at the router boundary: they are logged and turned
/// into a generic private reply when nothing has been sent yet.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required option was not delivered with the invocation.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// An option was delivered with the wrong type.
    #[error("Invalid argument '{name}': expected {expected}")]
    InvalidArgument { name: String, expected: &'static str },

    /// Sending the reply itself failed.
    #[error("Reply failed: {0}")]
    Reply(#[from] ReplyError),

    /// The handler panicked.
    #[error("Handler panicked: {0}")]
    Panicked(String),

    /// Any other handler failure.
    #[error("{0}")]
    Other(String),
}

/// Errors from the platform reply channel.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// A terminal reply was already sent for this invocation.
    #[error("Interaction has already been replied to")]
    AlreadyReplied,

    /// Deferral is only possible before anything was sent.
    #[error("Interaction has already been acknowledged")]
    AlreadyAcknowledged,

    /// The platform rejected the reply or the connection went away.
    #[error("Reply transport error: {0}")]
    Transport(String),
}

/// Errors from the webhook sub-protocol.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No webhook URL is configured.
    #[error("Webhook URL is not configured")]
    NotConfigured,

    /// The configured URL does not have the `.../webhooks/<id>/<token>` shape.
    #[error("Invalid webhook URL format: {0}")]
    InvalidUrl(String),

    /// Network or API failure while talking to the webhook endpoint.
    #[error("Webhook transport error: {0}")]
    Transport(String),
}

/// Result type for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;
