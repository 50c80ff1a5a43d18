//! Inbound message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::ChatUser;

/// Opaque channel identifier supplied by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A message delivered by a chat transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub author: ChatUser,
    /// Channel the message arrived in; replies go back here
    pub channel: ChannelId,
    pub content: String,
    /// Receipt timestamp, drives the rate-gate decision for this message
    pub sent_at: DateTime<Utc>,
}
