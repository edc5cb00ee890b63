//! Slot store port - the source of truth for availability.
//!
//! # Design
//!
//! - `reserve` is the one operation requiring true mutual exclusion: a
//!   single atomic check-and-set keyed by slot id. Two simultaneous
//!   reservation attempts for the same slot must yield exactly one success
//!   and one `SlotConflict`.
//! - No ordering guarantee is required across different slots; contention is
//!   scoped to a single slot identifier.
//! - `list` is read-only and reports the derived `past` status without
//!   mutating anything (derivation happens in the view layer via
//!   `Slot::effective_status`).

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, DomainError, SlotId, Timestamp};
use crate::domain::slot::Slot;

/// Store port for Slot persistence and the reservation primitive.
///
/// Implementations must make `reserve`/`release`/`block`/`unblock` atomic
/// per slot id - a per-row conditional update in a persistent store, or a
/// lock-guarded compare-and-set in memory.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// List slots whose start time falls within `[from, to)`, ordered by
    /// start time. Never mutates.
    async fn list(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Slot>, DomainError>;

    /// Find a slot by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SlotId) -> Result<Option<Slot>, DomainError>;

    /// Atomically transition an `Available` slot to `Booked`.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot does not exist
    /// - `SlotExpired` if the slot's start time has elapsed at `now`
    /// - `SlotConflict` if a concurrent caller reserved or blocked it first
    async fn reserve(
        &self,
        id: &SlotId,
        booking_id: &BookingId,
        now: Timestamp,
    ) -> Result<Slot, DomainError>;

    /// Atomic reverse of `reserve`: transition a `Booked` slot back to
    /// `Available`, clearing the booking reference.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot does not exist
    /// - `SlotConflict` if the slot is not currently `Booked`
    async fn release(&self, id: &SlotId) -> Result<Slot, DomainError>;

    /// Administratively withhold an `Available` slot.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot does not exist
    /// - `SlotConflict` unless the slot is `Available`
    async fn block(&self, id: &SlotId, reason: &str) -> Result<Slot, DomainError>;

    /// Lift an administrative block, restoring `Available`.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot does not exist
    /// - `SlotConflict` unless the slot is `Blocked`
    async fn unblock(&self, id: &SlotId) -> Result<Slot, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn slot_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SlotStore) {}
    }
}
