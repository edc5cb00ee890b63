//! Subscription period status.
//!
//! Unlike slot and booking statuses, this is **derived**: a period is
//! `Exhausted` iff no sessions remain and `Expired` iff the current date is
//! past `valid_until`. Nothing ever writes a status; it is computed from the
//! counters and the clock (see `SubscriptionPeriod::status`).

use serde::{Deserialize, Serialize};

/// Derived subscription period status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Usable: not expired and sessions remain.
    Active,

    /// The validity window has passed.
    Expired,

    /// All sessions have been used.
    Exhausted,
}

impl SubscriptionStatus {
    /// Returns true if bookings can be debited against this period.
    pub fn is_usable(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}
