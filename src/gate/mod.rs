//! Rate gate: minimum spacing between XP grants per user
//!
//! Timestamps are seeded on a user's first observed message and advanced
//! only when a grant happens. A brand-new user's first message therefore
//! never grants, and ineligible messages do not push the window forward.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// Seconds that must pass since the last grant before the next one
pub const GRANT_SPACING_SECS: i64 = 60;

/// Per-user last-grant timestamps
#[derive(Debug, Default)]
pub struct RateGate {
    last_grant: HashMap<UserId, DateTime<Utc>>,
}

impl RateGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the user's timestamp on their first observed message; later
    /// observations leave it untouched.
    pub fn observe(&mut self, user: &UserId, now: DateTime<Utc>) {
        self.last_grant.entry(user.clone()).or_insert(now);
    }

    /// Whether a grant is allowed at `now`. Users without an entry are
    /// eligible; callers that observe first will compare against the seed.
    pub fn eligible(&self, user: &UserId, now: DateTime<Utc>) -> bool {
        match self.last_grant.get(user) {
            Some(last) => (now - *last).num_seconds() >= GRANT_SPACING_SECS,
            None => true,
        }
    }

    /// Advance the window. Called only when a grant is actually issued.
    pub fn record_grant(&mut self, user: &UserId, now: DateTime<Utc>) {
        self.last_grant.insert(user.clone(), now);
    }
}
