//! Chat platform seam
//!
//! The bot core talks to the platform through [`ChatApi`] and consumes
//! [`crate::domain::ChatEvent`]s from an mpsc channel fed by a transport.
//! The only transport in this crate is the console one; real gateways
//! implement the same trait and channel contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChannelId, ChatUser, UserId};

pub mod console;

/// Errors surfaced by chat transports
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("transport closed")]
    Closed,
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Outbound capabilities of a connected chat session
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a text reply to a channel
    async fn send_to_channel(&self, channel: &ChannelId, text: &str) -> ChatResult<()>;

    /// Send a direct message to a user
    async fn send_direct(&self, user: &UserId, text: &str) -> ChatResult<()>;

    /// Resolve a user by id or display name from the session cache.
    /// Returns `None` for users the session has never seen.
    fn resolve_user(&self, query: &str) -> Option<ChatUser>;
}
