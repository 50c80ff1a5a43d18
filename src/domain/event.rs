//! Events emitted by chat transports

use super::message::IncomingMessage;
use super::user::ChatUser;

/// What a transport can deliver to the bot engine
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Session established; carries the bot's own identity
    Ready { user: ChatUser },
    /// A message arrived in a channel the bot can see
    Message(IncomingMessage),
}
