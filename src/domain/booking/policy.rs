//! Cancellation policy.
//!
//! Pure decision function over `(now, slot_start, caller_role)`. No clocks,
//! no stores - the ledger passes the current time in, which keeps the policy
//! trivially testable.
//!
//! Rules:
//! - Staff (trainer/admin) cancellation is refundable up until the slot has
//!   started; after start it is denied.
//! - Client self-cancellation is binary: refundable when the lead time is at
//!   least the configured window (12 hours by default), denied otherwise.
//!   There is no self-service "permitted but forfeited" path.
//!
//! `NonRefundable` exists as an outcome so an administrative override can
//! forfeit a session without a policy change; nothing produces it today.

use crate::domain::foundation::{Role, Timestamp};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default minimum lead time for a refundable client cancellation.
pub const DEFAULT_CANCELLATION_WINDOW_HOURS: i64 = 12;

/// Outcome of a cancellation permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationOutcome {
    /// Cancellation permitted; the debited session is credited back.
    Refundable,

    /// Cancellation permitted but the session is forfeited.
    NonRefundable,

    /// Cancellation not permitted; no state changes occur.
    Denied,
}

impl CancellationOutcome {
    /// Returns true if the cancellation may proceed at all.
    pub fn is_permitted(&self) -> bool {
        !matches!(self, CancellationOutcome::Denied)
    }

    /// Returns true if the debited session is returned.
    pub fn is_refundable(&self) -> bool {
        matches!(self, CancellationOutcome::Refundable)
    }
}

/// Role-aware cancellation cutoff policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    window: Duration,
}

impl CancellationPolicy {
    /// Creates a policy with the given client cancellation window in hours.
    pub fn new(window_hours: i64) -> Self {
        Self {
            window: Duration::hours(window_hours),
        }
    }

    /// The minimum lead time for a refundable client cancellation.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decides whether a cancellation is permitted and refundable.
    pub fn evaluate(&self, now: Timestamp, slot_start: Timestamp, role: Role) -> CancellationOutcome {
        // Nobody cancels a session that has already started.
        if !now.is_before(&slot_start) {
            return CancellationOutcome::Denied;
        }

        if role.is_staff() {
            return CancellationOutcome::Refundable;
        }

        let lead_time = slot_start.duration_since(&now);
        if lead_time >= self.window {
            CancellationOutcome::Refundable
        } else {
            CancellationOutcome::Denied
        }
    }
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CANCELLATION_WINDOW_HOURS)
    }
}
