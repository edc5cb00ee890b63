//! Booking status state machine.
//!
//! Booking transitions are monotone: once a booking leaves `Active`
//! there is no way back.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The client holds the slot.
    Active,

    /// Cancelled before the session; the slot was released.
    Cancelled,

    /// The session window has fully elapsed.
    Completed,
}

impl BookingStatus {
    /// Returns true while the booking still occupies its slot.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Active)
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!((self, target), (Active, Cancelled) | (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Active => vec![Cancelled, Completed],
            Cancelled => vec![],
            Completed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_can_transition_to_cancelled() {
        let result = BookingStatus::Active.transition_to(BookingStatus::Cancelled);
        assert_eq!(result, Ok(BookingStatus::Cancelled));
    }

    #[test]
    fn active_can_transition_to_completed() {
        let result = BookingStatus::Active.transition_to(BookingStatus::Completed);
        assert_eq!(result, Ok(BookingStatus::Completed));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Cancelled
            .transition_to(BookingStatus::Active)
            .is_err());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Completed
            .transition_to(BookingStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn only_active_is_active() {
        assert!(BookingStatus::Active.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::Completed.is_active());
    }

    #[test]
    fn status_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
