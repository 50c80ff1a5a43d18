//! Console transport: chat over stdin/stdout for local runs
//!
//! One inbound message per line, `name: text`. Outbound channel sends and
//! direct messages are printed. EOF on stdin closes the event stream and
//! the bot shuts down.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::{ChannelId, ChatEvent, ChatUser, IncomingMessage, UserId};

use super::{ChatApi, ChatError, ChatResult};

/// Channel id carried by every console message
pub const CONSOLE_CHANNEL: &str = "console";

/// Display name the console session logs in with
pub const BOT_NAME: &str = "rankup";

/// In-process transport backed by stdin/stdout.
///
/// Everyone who has spoken on stdin is kept in a roster so `resolve_user`
/// behaves like a real session cache; ids loaded from an old snapshot but
/// never seen on stdin stay unresolved.
pub struct ConsoleChat {
    roster: Mutex<IndexMap<UserId, ChatUser>>,
}

impl ConsoleChat {
    /// Start the transport: emits `Ready`, then one `Message` per stdin
    /// line until EOF. The token is accepted for parity with real gateways;
    /// a console session transmits nothing.
    pub fn start(_token: &str) -> (mpsc::Receiver<ChatEvent>, Arc<Self>) {
        let (tx, rx) = mpsc::channel(64);
        let chat = Arc::new(Self {
            roster: Mutex::new(IndexMap::new()),
        });

        let reader_chat = chat.clone();
        tokio::spawn(async move {
            let bot_user = ChatUser::bot("0", BOT_NAME);
            if tx.send(ChatEvent::Ready { user: bot_user }).await.is_err() {
                return;
            }

            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let Some(message) = reader_chat.parse_line(&line) else {
                            continue;
                        };
                        if tx.send(ChatEvent::Message(message)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("[console] stdin closed");
                        break;
                    }
                    Err(e) => {
                        warn!("[console] read error: {}", e);
                        break;
                    }
                }
            }
        });

        (rx, chat)
    }

    /// Parse `name: text` into a message, registering the author in the
    /// roster on first sight. Lines without that shape are skipped.
    fn parse_line(&self, line: &str) -> Option<IncomingMessage> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some((name, text)) = line.split_once(':') else {
            debug!("[console] ignoring line without a 'name: text' shape");
            return None;
        };
        let name = name.trim();
        let text = text.trim();
        if name.is_empty() || text.is_empty() {
            debug!("[console] ignoring line with an empty name or text");
            return None;
        }

        let author = self.register(name)?;
        Some(IncomingMessage {
            author,
            channel: ChannelId::new(CONSOLE_CHANNEL),
            content: text.to_string(),
            sent_at: Utc::now(),
        })
    }

    fn register(&self, name: &str) -> Option<ChatUser> {
        let mut roster = match self.roster.lock() {
            Ok(roster) => roster,
            Err(e) => {
                warn!("[console] roster lock poisoned: {}", e);
                return None;
            }
        };
        let user = roster
            .entry(UserId::new(name))
            .or_insert_with(|| ChatUser::new(name, name));
        Some(user.clone())
    }
}

#[async_trait]
impl ChatApi for ConsoleChat {
    async fn send_to_channel(&self, channel: &ChannelId, text: &str) -> ChatResult<()> {
        println!("[#{}] {}", channel, text);
        Ok(())
    }

    async fn send_direct(&self, user: &UserId, text: &str) -> ChatResult<()> {
        let name = self
            .resolve_user(user.as_str())
            .map(|u| u.name)
            .ok_or_else(|| ChatError::UnknownUser(user.clone()))?;
        println!("[dm -> {}] {}", name, text);
        Ok(())
    }

    fn resolve_user(&self, query: &str) -> Option<ChatUser> {
        let roster = self.roster.lock().ok()?;
        if let Some(user) = roster.get(&UserId::new(query)) {
            return Some(user.clone());
        }
        roster
            .values()
            .find(|u| u.name.eq_ignore_ascii_case(query))
            .cloned()
    }
}
