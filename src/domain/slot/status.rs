//! Slot status state machine.
//!
//! Defines the stored slot lifecycle states and valid transitions.
//! `Past` is never stored - it is derived at read time from the clock
//! (see `Slot::effective_status`).

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Training slot lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Open for booking.
    Available,

    /// Occupied by exactly one active booking.
    Booked,

    /// Administratively withheld. Can never transition directly to Booked.
    Blocked,

    /// Start time has elapsed. Derived state, never persisted.
    Past,
}

impl SlotStatus {
    /// Returns true if a reservation attempt against this status can succeed.
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotStatus::Available)
    }
}

impl StateMachine for SlotStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SlotStatus::*;
        matches!(
            (self, target),
            // From AVAILABLE
            (Available, Booked)
                | (Available, Blocked)
            // From BOOKED (cancellation reversal)
                | (Booked, Available)
            // From BLOCKED (administrative unblock)
                | (Blocked, Available)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SlotStatus::*;
        match self {
            Available => vec![Booked, Blocked],
            Booked => vec![Available],
            Blocked => vec![Available],
            // Past is a read-time view; no stored transitions exist.
            Past => vec![],
        }
    }
}
