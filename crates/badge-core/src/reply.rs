//! The platform's "respond to this invocation" capability.

use async_trait::async_trait;

use crate::error::ReplyError;
use crate::payload::{OutboundPayload, Visibility};

/// Responds to a single invocation.
///
/// Implementations talk to the platform; they do not track reply state.
/// [`HandlerContext`](crate::context::HandlerContext) decides which method
/// to call from the invocation's [`ReplyState`](crate::ReplyState).
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Send the initial response.
    async fn respond(&self, payload: OutboundPayload) -> Result<(), ReplyError>;

    /// Acknowledge now and answer later with [`follow_up`](Self::follow_up).
    async fn defer(&self, visibility: Visibility) -> Result<(), ReplyError>;

    /// Send the response to a deferred invocation.
    async fn follow_up(&self, payload: OutboundPayload) -> Result<(), ReplyError>;
}
