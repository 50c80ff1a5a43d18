//! Command parsing and reply rendering
//!
//! Commands are ordinary messages starting with the configured prefix.
//! Unknown commands are ignored without a reply, matching how platform
//! command frameworks swallow them.

use crate::chat::ChatApi;
use crate::domain::ChatUser;
use crate::ledger::XpLedger;

/// Entries a leaderboard reply shows
pub const LEADERBOARD_SIZE: usize = 10;

pub const HELLO_REPLY: &str = "Hello, world!";
pub const PING_REPLY: &str = "Pong!";

/// Reply when a `level` target cannot be resolved or has never earned XP
pub const UNKNOWN_USER_REPLY: &str = "User not found or has no XP.";

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report a user's level and XP to the next level (defaults to sender)
    Level { target: Option<String> },
    /// Top ten users by XP
    Leaderboard,
    /// Greeting check
    Hello,
    /// Liveness check
    Ping,
}

impl Command {
    /// Parse message content; `None` for non-commands and unknown commands
    pub fn parse(prefix: &str, content: &str) -> Option<Command> {
        let rest = content.strip_prefix(prefix)?;
        let mut words = rest.split_whitespace();
        match words.next()? {
            "level" => Some(Command::Level {
                target: words.next().map(str::to_string),
            }),
            "leaderboard" => Some(Command::Leaderboard),
            "hello" => Some(Command::Hello),
            "ping" => Some(Command::Ping),
            _ => None,
        }
    }
}

/// Render the `level` reply for a resolved user
pub fn level_reply(ledger: &XpLedger, user: &ChatUser) -> String {
    if ledger.total_of(&user.id).is_none() {
        return UNKNOWN_USER_REPLY.to_string();
    }

    let progress = ledger.progress_of(&user.id);
    match progress.xp_to_next {
        Some(needed) => format!(
            "{} is level {}, and needs {} more XP to reach the next level.",
            user.name, progress.level, needed
        ),
        None => format!("{} is at the maximum level!", user.name),
    }
}

/// Render the leaderboard, resolving display names through the session
/// cache. Unresolved ids stay on the board as "Unknown User".
pub fn leaderboard_reply(ledger: &XpLedger, api: &dyn ChatApi) -> String {
    let mut text = String::from("Leaderboard:\n");
    for (rank, (user_id, xp)) in ledger.top(LEADERBOARD_SIZE).into_iter().enumerate() {
        let line = match api.resolve_user(user_id.as_str()) {
            Some(user) => format!("{}. {}: {} XP\n", rank + 1, user.name, xp),
            None => format!("{}. Unknown User: {} XP (User not found)\n", rank + 1, xp),
        };
        text.push_str(&line);
    }
    text
}
