//! Bot engine: event loop, XP pipeline and level-up notification
//!
//! One event is fully processed before the next, so the ledger and rate
//! gate never see concurrent mutation and every grant is persisted inside
//! the same critical section that produced it.

pub mod commands;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::chat::ChatApi;
use crate::config::BotConfig;
use crate::domain::{ChatEvent, ChatUser, IncomingMessage};
use crate::gate::RateGate;
use crate::ledger::XpLedger;

use commands::Command;

/// XP credited per eligible message
pub const BASE_XP_PER_MESSAGE: u64 = 50;

/// The bot: owns the ledger and rate gate, talks to the platform through
/// the chat api handle.
pub struct Bot {
    config: BotConfig,
    ledger: XpLedger,
    gate: RateGate,
    api: Arc<dyn ChatApi>,
    identity: Option<ChatUser>,
}

impl Bot {
    pub fn new(config: BotConfig, ledger: XpLedger, api: Arc<dyn ChatApi>) -> Self {
        Self {
            config,
            ledger,
            gate: RateGate::new(),
            api,
            identity: None,
        }
    }

    /// Ledger access for read-only callers
    pub fn ledger(&self) -> &XpLedger {
        &self.ledger
    }

    /// The session identity, once a `Ready` event has arrived
    pub fn identity(&self) -> Option<&ChatUser> {
        self.identity.as_ref()
    }

    /// Handle one chat event to completion
    pub async fn handle_event(&mut self, event: ChatEvent) -> Result<()> {
        match event {
            ChatEvent::Ready { user } => {
                info!("Logged in as {}", user.name);
                self.identity = Some(user);
                Ok(())
            }
            ChatEvent::Message(message) => self.handle_message(message).await,
        }
    }

    /// Commands run first, then the XP pipeline; bot authors are ignored
    /// outright so the bot can never feed itself XP.
    async fn handle_message(&mut self, message: IncomingMessage) -> Result<()> {
        if message.author.is_bot {
            return Ok(());
        }

        if let Some(command) = Command::parse(&self.config.command_prefix, &message.content) {
            if let Err(e) = self.run_command(command, &message).await {
                warn!("command reply failed: {:#}", e);
            }
        }

        self.award_message_xp(&message).await
    }

    /// The XP pipeline: observe, check the gate, grant, persist, notify.
    /// Max-level users earn nothing and their window is left untouched.
    async fn award_message_xp(&mut self, message: &IncomingMessage) -> Result<()> {
        let user_id = &message.author.id;
        let now = message.sent_at;

        self.gate.observe(user_id, now);
        if !self.gate.eligible(user_id, now) {
            return Ok(());
        }

        let before = self.ledger.progress_of(user_id);
        if self.ledger.levels().is_max_level(before.level) {
            return Ok(());
        }

        let total = self.ledger.grant(user_id, BASE_XP_PER_MESSAGE);
        self.gate.record_grant(user_id, now);
        self.ledger.persist()?;
        debug!(
            "granted {} XP to {} (total {})",
            BASE_XP_PER_MESSAGE, message.author.name, total
        );

        let after = self.ledger.progress_of(user_id);
        if after.level > before.level {
            self.notify_level_up(&message.author, after.level).await;
        }

        Ok(())
    }

    /// Congratulate a user by direct message. Delivery failures are logged
    /// and never propagate into the message pipeline.
    async fn notify_level_up(&self, user: &ChatUser, new_level: usize) {
        info!("{} reached level {}", user.name, new_level);
        let text = format!("Congratulations! You've reached level {}.", new_level);
        if let Err(e) = self.api.send_direct(&user.id, &text).await {
            warn!("level-up notification to {} failed: {}", user.name, e);
        }
    }

    async fn run_command(&self, command: Command, message: &IncomingMessage) -> Result<()> {
        let reply = match command {
            Command::Level { target } => match target {
                None => commands::level_reply(&self.ledger, &message.author),
                Some(query) => match self.api.resolve_user(&query) {
                    Some(user) => commands::level_reply(&self.ledger, &user),
                    None => commands::UNKNOWN_USER_REPLY.to_string(),
                },
            },
            Command::Leaderboard => commands::leaderboard_reply(&self.ledger, self.api.as_ref()),
            Command::Hello => commands::HELLO_REPLY.to_string(),
            Command::Ping => commands::PING_REPLY.to_string(),
        };

        self.api.send_to_channel(&message.channel, &reply).await?;
        Ok(())
    }
}

/// Drive the bot until the event stream closes. Event-level failures are
/// logged and the loop moves on; a persist error must not tear down chat.
pub async fn run(mut bot: Bot, mut events: mpsc::Receiver<ChatEvent>) -> Result<()> {
    while let Some(event) = events.recv().await {
        if let Err(e) = bot.handle_event(event).await {
            error!("event handling failed: {:#}", e);
        }
    }
    info!("event stream closed, shutting down");
    Ok(())
}
