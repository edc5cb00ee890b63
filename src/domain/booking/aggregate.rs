//! Booking aggregate entity.
//!
//! A Booking is a client's claim on a slot, created atomically with the
//! slot's transition to `Booked` and the subscription debit. It holds
//! weak (id-only) references to the slot it occupies and the subscription
//! period it debited.
//!
//! # Invariants
//!
//! - Exactly one `Active` booking exists per slot (enforced by the
//!   SlotStore's reservation CAS, recorded here)
//! - Status transitions are monotone: `Active -> Cancelled` or
//!   `Active -> Completed`, nothing leaves a terminal state

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, Role, SlotId, StateMachine, SubscriptionId, Timestamp,
    UserId,
};
use serde::{Deserialize, Serialize};

use super::BookingStatus;

/// The actor who cancelled a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellingActor {
    /// Identity of the caller who cancelled.
    pub user_id: UserId,

    /// Role the caller held at cancellation time.
    pub role: Role,
}

/// A client's claim on a training slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for this booking.
    pub id: BookingId,

    /// The client who owns this booking.
    pub client_id: UserId,

    /// The slot this booking occupies (weak reference).
    pub slot_id: SlotId,

    /// The subscription period debited for this booking (weak reference).
    pub subscription_id: SubscriptionId,

    /// Current lifecycle status.
    pub status: BookingStatus,

    /// When the booking was created.
    pub created_at: Timestamp,

    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<Timestamp>,

    /// Free-text cancellation reason, if cancelled.
    pub cancel_reason: Option<String>,

    /// Who cancelled the booking, if cancelled.
    pub cancelled_by: Option<CancellingActor>,
}

impl Booking {
    /// Creates a new active booking.
    pub fn create(
        id: BookingId,
        client_id: UserId,
        slot_id: SlotId,
        subscription_id: SubscriptionId,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            slot_id,
            subscription_id,
            status: BookingStatus::Active,
            created_at: now,
            cancelled_at: None,
            cancel_reason: None,
            cancelled_by: None,
        }
    }

    /// Returns true while the booking still occupies its slot.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns true if the given caller owns this booking.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id
    }

    /// Cancel this booking, recording reason and actor.
    ///
    /// # Errors
    ///
    /// Returns error if the booking is not `Active`.
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        actor: CancellingActor,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Cancelled)?;
        self.cancelled_at = Some(now);
        self.cancel_reason = Some(reason.into());
        self.cancelled_by = Some(actor);
        Ok(())
    }

    /// Mark this booking completed once its session has fully elapsed.
    ///
    /// Completion never touches the subscription balance; the debit from
    /// booking time stands.
    ///
    /// # Errors
    ///
    /// Returns error if the booking is not `Active`.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(BookingStatus::Completed)
    }

    fn transition_to(&mut self, target: BookingStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Booking {} cannot transition from {:?} to {:?}",
                    self.id, self.status, target
                ),
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> UserId {
        UserId::new("client-123").unwrap()
    }

    fn test_booking() -> Booking {
        Booking::create(
            BookingId::new(),
            test_client(),
            SlotId::new(),
            SubscriptionId::new(),
            Timestamp::now(),
        )
    }

    fn client_actor() -> CancellingActor {
        CancellingActor {
            user_id: test_client(),
            role: Role::Client,
        }
    }

    // Construction tests

    #[test]
    fn create_starts_active() {
        let booking = test_booking();
        assert_eq!(booking.status, BookingStatus::Active);
        assert!(booking.is_active());
        assert!(booking.cancelled_at.is_none());
        assert!(booking.cancel_reason.is_none());
        assert!(booking.cancelled_by.is_none());
    }

    #[test]
    fn ownership_check_matches_client() {
        let booking = test_booking();
        assert!(booking.is_owned_by(&test_client()));
        assert!(!booking.is_owned_by(&UserId::new("someone-else").unwrap()));
    }

    // Cancellation tests

    #[test]
    fn cancel_records_reason_actor_and_time() {
        let mut booking = test_booking();
        let now = Timestamp::now();

        booking.cancel("schedule change", client_actor(), now).unwrap();

        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.cancelled_at, Some(now));
        assert_eq!(booking.cancel_reason.as_deref(), Some("schedule change"));
        assert_eq!(booking.cancelled_by.unwrap().role, Role::Client);
    }

    #[test]
    fn cancel_fails_when_already_cancelled() {
        let mut booking = test_booking();
        booking
            .cancel("first", client_actor(), Timestamp::now())
            .unwrap();

        let err = booking
            .cancel("second", client_actor(), Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn cancel_fails_when_completed() {
        let mut booking = test_booking();
        booking.complete().unwrap();

        let err = booking
            .cancel("too late", client_actor(), Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    // Completion tests

    #[test]
    fn complete_transitions_active_booking() {
        let mut booking = test_booking();
        booking.complete().unwrap();
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn complete_fails_when_cancelled() {
        let mut booking = test_booking();
        booking
            .cancel("gone", client_actor(), Timestamp::now())
            .unwrap();

        assert!(booking.complete().is_err());
    }

    #[test]
    fn complete_is_not_repeatable() {
        let mut booking = test_booking();
        booking.complete().unwrap();
        assert!(booking.complete().is_err());
    }
}
