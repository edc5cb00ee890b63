//! Booking repository port.
//!
//! Persists Booking records. The uniqueness of one active booking per slot
//! is guaranteed upstream by the SlotStore's reservation CAS; this
//! repository just records the outcome.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, UserId};

/// Repository port for Booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking.
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Update an existing booking.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if the booking doesn't exist.
    async fn update(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Find a booking by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// A client's bookings, most recently created first, capped at `limit`.
    async fn list_for_client(
        &self,
        client_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Booking>, DomainError>;

    /// All currently active bookings. Used by the completion sweep.
    async fn list_active(&self) -> Result<Vec<Booking>, DomainError>;
}
