//! rankup - a chat XP bot
//!
//! Tracks per-user XP from message activity, computes levels from a tiered
//! requirement table, keeps everything in a flat JSON snapshot, and answers
//! a small set of commands (`level`, `leaderboard`, `hello`, `ping`).
//!
//! The chat platform sits behind the [`chat::ChatApi`] trait plus a stream
//! of [`domain::ChatEvent`]s, so the XP core is platform-agnostic. The
//! console transport in [`chat::console`] runs the bot against
//! stdin/stdout for local use.

pub mod bot;
pub mod chat;
pub mod config;
pub mod domain;
pub mod gate;
pub mod ledger;

pub use domain::*;
