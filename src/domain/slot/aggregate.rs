//! Slot aggregate entity.
//!
//! A Slot is a fixed-duration, dated time unit owned by the SlotStore.
//! Slots are created by an external administrative seeding process; this
//! aggregate only manages the booking lifecycle of an existing slot.
//!
//! # Invariants
//!
//! - At most one active booking references a slot at any time (the
//!   `booking_id` field is `Some` exactly while status is `Booked`)
//! - A `Blocked` slot can never move directly to `Booked`
//! - `Past` is never stored; it is derived from the clock at read time

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SlotId, StateMachine, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::SlotStatus;

/// A bookable training slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique identifier for this slot.
    pub id: SlotId,

    /// When the session starts.
    pub starts_at: Timestamp,

    /// Session length in minutes.
    pub duration_minutes: u32,

    /// Stored lifecycle status (never `Past`).
    pub status: SlotStatus,

    /// The active booking occupying this slot, if any.
    pub booking_id: Option<BookingId>,

    /// Reason recorded when the slot was administratively blocked.
    pub block_reason: Option<String>,
}

impl Slot {
    /// Creates a new available slot.
    ///
    /// Seeding slots is an administrative concern; this constructor exists
    /// for adapters and tests that materialize the schedule.
    pub fn new(id: SlotId, starts_at: Timestamp, duration_minutes: u32) -> Self {
        Self {
            id,
            starts_at,
            duration_minutes,
            status: SlotStatus::Available,
            booking_id: None,
            block_reason: None,
        }
    }

    /// When the session ends.
    pub fn ends_at(&self) -> Timestamp {
        self.starts_at.plus_minutes(self.duration_minutes as i64)
    }

    /// Returns true once the slot's start time has elapsed.
    pub fn has_started(&self, now: Timestamp) -> bool {
        !now.is_before(&self.starts_at)
    }

    /// Returns true once the full session window has elapsed.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        !now.is_before(&self.ends_at())
    }

    /// The status reported to callers, with `Past` derived from the clock.
    ///
    /// Repeated reads are stable: nothing is mutated here.
    pub fn effective_status(&self, now: Timestamp) -> SlotStatus {
        if self.has_started(now) {
            SlotStatus::Past
        } else {
            self.status
        }
    }

    /// Transition this slot to `Booked`, recording the occupying booking.
    ///
    /// This is the check half of the store's check-and-set; callers must
    /// invoke it while holding whatever exclusivity the store provides.
    ///
    /// # Errors
    ///
    /// - `SlotExpired` if the slot has already started
    /// - `SlotConflict` if the slot is not `Available`
    pub fn reserve(&mut self, booking_id: BookingId, now: Timestamp) -> Result<(), DomainError> {
        if self.has_started(now) {
            return Err(DomainError::new(
                ErrorCode::SlotExpired,
                format!("Slot {} has already started", self.id),
            ));
        }
        self.transition_to(SlotStatus::Booked, ErrorCode::SlotConflict)?;
        self.booking_id = Some(booking_id);
        Ok(())
    }

    /// Reverse a reservation, restoring `Available`.
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` if the slot is not currently `Booked`.
    pub fn release(&mut self) -> Result<(), DomainError> {
        if self.status != SlotStatus::Booked {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                format!("Slot {} is not booked", self.id),
            ));
        }
        self.transition_to(SlotStatus::Available, ErrorCode::SlotConflict)?;
        self.booking_id = None;
        Ok(())
    }

    /// Administratively withhold this slot.
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` unless the slot is `Available`.
    pub fn block(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.transition_to(SlotStatus::Blocked, ErrorCode::SlotConflict)?;
        self.block_reason = Some(reason.into());
        Ok(())
    }

    /// Lift an administrative block, restoring `Available`.
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` unless the slot is `Blocked`.
    pub fn unblock(&mut self) -> Result<(), DomainError> {
        if self.status != SlotStatus::Blocked {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                format!("Slot {} is not blocked", self.id),
            ));
        }
        self.transition_to(SlotStatus::Available, ErrorCode::SlotConflict)?;
        self.block_reason = None;
        Ok(())
    }

    fn transition_to(&mut self, target: SlotStatus, code: ErrorCode) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                code,
                format!(
                    "Slot {} cannot transition from {:?} to {:?}",
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

    fn future_slot() -> Slot {
        Slot::new(SlotId::new(), Timestamp::now().plus_days(2), 60)
    }

    fn past_slot() -> Slot {
        Slot::new(SlotId::new(), Timestamp::now().minus_hours(2), 60)
    }

    // Construction tests

    #[test]
    fn new_slot_starts_available() {
        let slot = future_slot();
        assert_eq!(slot.status, SlotStatus::Available);
        assert!(slot.booking_id.is_none());
        assert!(slot.block_reason.is_none());
    }

    #[test]
    fn ends_at_adds_duration() {
        let slot = future_slot();
        assert_eq!(slot.ends_at(), slot.starts_at.plus_minutes(60));
    }

    // Reservation tests

    #[test]
    fn reserve_books_available_slot() {
        let mut slot = future_slot();
        let booking_id = BookingId::new();

        let result = slot.reserve(booking_id, Timestamp::now());
        assert!(result.is_ok());
        assert_eq!(slot.status, SlotStatus::Booked);
        assert_eq!(slot.booking_id, Some(booking_id));
    }

    #[test]
    fn reserve_fails_with_conflict_when_already_booked() {
        let mut slot = future_slot();
        slot.reserve(BookingId::new(), Timestamp::now()).unwrap();

        let err = slot.reserve(BookingId::new(), Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotConflict);
    }

    #[test]
    fn reserve_fails_with_conflict_when_blocked() {
        let mut slot = future_slot();
        slot.block("trainer away").unwrap();

        let err = slot.reserve(BookingId::new(), Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotConflict);
    }

    #[test]
    fn reserve_fails_with_expired_when_started() {
        let mut slot = past_slot();

        let err = slot.reserve(BookingId::new(), Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotExpired);
        // No partial mutation on failure
        assert_eq!(slot.status, SlotStatus::Available);
        assert!(slot.booking_id.is_none());
    }

    #[test]
    fn reserve_at_exact_start_time_is_expired() {
        let starts_at = Timestamp::now();
        let mut slot = Slot::new(SlotId::new(), starts_at, 60);

        let err = slot.reserve(BookingId::new(), starts_at).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotExpired);
    }

    // Release tests

    #[test]
    fn release_restores_available_and_clears_booking() {
        let mut slot = future_slot();
        slot.reserve(BookingId::new(), Timestamp::now()).unwrap();

        slot.release().unwrap();
        assert_eq!(slot.status, SlotStatus::Available);
        assert!(slot.booking_id.is_none());
    }

    #[test]
    fn release_fails_when_not_booked() {
        let mut slot = future_slot();
        let err = slot.release().unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotConflict);
    }

    // Block tests

    #[test]
    fn block_records_reason() {
        let mut slot = future_slot();
        slot.block("equipment maintenance").unwrap();

        assert_eq!(slot.status, SlotStatus::Blocked);
        assert_eq!(slot.block_reason.as_deref(), Some("equipment maintenance"));
    }

    #[test]
    fn block_fails_when_booked() {
        let mut slot = future_slot();
        slot.reserve(BookingId::new(), Timestamp::now()).unwrap();

        let err = slot.block("too late").unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotConflict);
    }

    #[test]
    fn unblock_restores_available_and_clears_reason() {
        let mut slot = future_slot();
        slot.block("holiday").unwrap();

        slot.unblock().unwrap();
        assert_eq!(slot.status, SlotStatus::Available);
        assert!(slot.block_reason.is_none());
    }

    #[test]
    fn unblock_fails_when_not_blocked() {
        let mut slot = future_slot();
        let err = slot.unblock().unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotConflict);
    }

    // Derived status tests

    #[test]
    fn effective_status_reports_past_once_started() {
        let slot = past_slot();
        assert_eq!(slot.effective_status(Timestamp::now()), SlotStatus::Past);
        // Stored status is untouched
        assert_eq!(slot.status, SlotStatus::Available);
    }

    #[test]
    fn effective_status_is_stable_across_reads() {
        let slot = past_slot();
        let now = Timestamp::now();
        assert_eq!(slot.effective_status(now), slot.effective_status(now));
    }

    #[test]
    fn effective_status_reports_stored_status_before_start() {
        let mut slot = future_slot();
        assert_eq!(
            slot.effective_status(Timestamp::now()),
            SlotStatus::Available
        );

        slot.block("away").unwrap();
        assert_eq!(slot.effective_status(Timestamp::now()), SlotStatus::Blocked);
    }

    #[test]
    fn booked_slot_reports_past_after_start() {
        let starts_at = Timestamp::now().plus_hours(1);
        let mut slot = Slot::new(SlotId::new(), starts_at, 60);
        slot.reserve(BookingId::new(), Timestamp::now()).unwrap();

        assert_eq!(slot.effective_status(starts_at.plus_hours(2)), SlotStatus::Past);
    }
}
