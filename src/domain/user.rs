//! User identity types shared by the chat seam and the ledger

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque platform user identifier.
///
/// Serializes as a bare string so it can key the ledger snapshot directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A chat platform user as seen by the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: UserId,
    /// Display name used in replies and leaderboard lines
    pub name: String,
    /// Set for the bot's own account and other automated accounts
    pub is_bot: bool,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            is_bot: false,
        }
    }

    /// A user flagged as a bot account
    pub fn bot(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            is_bot: true,
        }
    }
}
