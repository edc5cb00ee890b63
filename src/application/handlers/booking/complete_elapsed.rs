//! CompleteElapsedHandler - read-time reconciliation of finished sessions.
//!
//! An active booking whose slot's session window has fully elapsed is
//! reclassified to `completed`. There is no background scheduler; this
//! sweep is triggered externally (an admin endpoint, a cron hitting it)
//! and is idempotent - completed bookings drop out of the active set, so
//! running it twice is a no-op.
//!
//! Completion never touches the subscription balance: the debit happened
//! at booking time and attendance does not reverse it.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::domain::foundation::{AuthenticatedUser, BookingId};
use crate::ports::{BookingRepository, Clock, SlotStore};

/// Command to run the completion sweep.
#[derive(Debug, Clone)]
pub struct CompleteElapsedCommand {
    pub caller: AuthenticatedUser,
}

/// Result of a completion sweep.
#[derive(Debug, Clone)]
pub struct CompleteElapsedResult {
    /// Bookings reclassified by this run.
    pub completed: Vec<BookingId>,
}

/// Handler for the completion sweep. Staff only.
pub struct CompleteElapsedHandler {
    slots: Arc<dyn SlotStore>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl CompleteElapsedHandler {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            bookings,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteElapsedCommand,
    ) -> Result<CompleteElapsedResult, BookingError> {
        if !cmd.caller.role.is_staff() {
            return Err(BookingError::forbidden(
                "Only staff can run the completion sweep",
            ));
        }

        let now = self.clock.now();
        let active = self
            .bookings
            .list_active()
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        let mut completed = Vec::new();
        for mut booking in active {
            let slot = self
                .slots
                .find_by_id(&booking.slot_id)
                .await
                .map_err(|e| BookingError::infrastructure(e.to_string()))?;

            let Some(slot) = slot else {
                tracing::warn!(
                    booking_id = %booking.id,
                    slot_id = %booking.slot_id,
                    "active booking references missing slot; skipping"
                );
                continue;
            };

            if !slot.has_ended(now) {
                continue;
            }

            booking
                .complete()
                .map_err(|e| BookingError::infrastructure(e.to_string()))?;
            self.bookings
                .update(&booking)
                .await
                .map_err(|e| BookingError::infrastructure(e.to_string()))?;
            completed.push(booking.id);
        }

        if !completed.is_empty() {
            tracing::info!(count = completed.len(), "bookings marked completed");
        }

        Ok(CompleteElapsedResult { completed })
    }
}
