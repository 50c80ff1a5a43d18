//! Core domain types for rankup

mod event;
mod message;
mod user;

pub use event::ChatEvent;
pub use message::{ChannelId, IncomingMessage};
pub use user::{ChatUser, UserId};
