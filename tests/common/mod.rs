//! Shared helpers for integration tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use rankup::chat::{ChatApi, ChatError, ChatResult};
use rankup::config::BotConfig;
use rankup::domain::{ChannelId, ChatUser, IncomingMessage, UserId};

/// Chat double that records every send and resolves users from a fixed
/// roster. `fail_direct` makes `send_direct` behave like a user whose
/// direct messages are disabled; `fail_channel` makes `send_to_channel`
/// fail like a channel the bot cannot post to.
#[derive(Default)]
pub struct RecordingChat {
    roster: Mutex<Vec<ChatUser>>,
    channel_sends: Mutex<Vec<(ChannelId, String)>>,
    direct_sends: Mutex<Vec<(UserId, String)>>,
    pub fail_direct: AtomicBool,
    pub fail_channel: AtomicBool,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: ChatUser) {
        self.roster.lock().expect("roster lock").push(user);
    }

    pub fn channel_sends(&self) -> Vec<(ChannelId, String)> {
        self.channel_sends.lock().expect("sends lock").clone()
    }

    pub fn direct_sends(&self) -> Vec<(UserId, String)> {
        self.direct_sends.lock().expect("sends lock").clone()
    }
}

#[async_trait]
impl ChatApi for RecordingChat {
    async fn send_to_channel(&self, channel: &ChannelId, text: &str) -> ChatResult<()> {
        if self.fail_channel.load(Ordering::SeqCst) {
            return Err(ChatError::Delivery("channel unavailable".to_string()));
        }
        self.channel_sends
            .lock()
            .expect("sends lock")
            .push((channel.clone(), text.to_string()));
        Ok(())
    }

    async fn send_direct(&self, user: &UserId, text: &str) -> ChatResult<()> {
        if self.fail_direct.load(Ordering::SeqCst) {
            return Err(ChatError::Delivery("direct messages disabled".to_string()));
        }
        self.direct_sends
            .lock()
            .expect("sends lock")
            .push((user.clone(), text.to_string()));
        Ok(())
    }

    fn resolve_user(&self, query: &str) -> Option<ChatUser> {
        self.roster
            .lock()
            .expect("roster lock")
            .iter()
            .find(|u| u.id.as_str() == query || u.name.eq_ignore_ascii_case(query))
            .cloned()
    }
}

/// Fixed base instant so tests control the rate gate precisely
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn seconds(s: i64) -> Duration {
    Duration::seconds(s)
}

/// A message from `user` in the shared test channel at time `at`
pub fn message_at(user: &ChatUser, content: &str, at: DateTime<Utc>) -> IncomingMessage {
    IncomingMessage {
        author: user.clone(),
        channel: ChannelId::new("general"),
        content: content.to_string(),
        sent_at: at,
    }
}

/// Config with a short threshold table so level-ups happen quickly
pub fn test_config() -> BotConfig {
    BotConfig {
        command_prefix: "$".to_string(),
        snapshot: "xp.json".to_string(),
        level_xp: vec![100, 200, 300],
    }
}
