//! BookSlotHandler - the booking half of the ledger.
//!
//! Turns a (caller, slot) pair into a booking record by driving the slot
//! store and the subscription account as one logical transaction. The two
//! stores are independently-locked resources, so atomicity is achieved with
//! ordered operations plus an explicit compensating action instead of a
//! cross-resource lock:
//!
//! 1. select the active subscription period (fail fast)
//! 2. reserve the slot (atomic check-and-set)
//! 3. debit the period (atomic counter update)
//! 4. persist the booking record
//!
//! If step 3 fails the reservation from step 2 is rolled back before the
//! error surfaces; if step 4 fails both the debit and the reservation are
//! reversed. A `book` call never reports success while either resource was
//! left half-transitioned.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{
    AuthenticatedUser, BookingId, DomainError, ErrorCode, Role, SlotId,
};
use crate::domain::slot::Slot;
use crate::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

/// Command to book a slot.
#[derive(Debug, Clone)]
pub struct BookSlotCommand {
    pub caller: AuthenticatedUser,
    pub slot_id: SlotId,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookSlotResult {
    pub booking: Booking,
    pub slot: Slot,
    /// Sessions left on the debited period after this booking.
    pub remaining_sessions: u32,
}

/// Handler for booking slots.
///
/// Only callers with role `client` may book, and only for themselves;
/// staff booking on behalf of a client is a distinct administrative
/// operation this service does not expose.
pub struct BookSlotHandler {
    slots: Arc<dyn SlotStore>,
    subscriptions: Arc<dyn SubscriptionAccount>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl BookSlotHandler {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        subscriptions: Arc<dyn SubscriptionAccount>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            subscriptions,
            bookings,
            clock,
        }
    }

    pub async fn handle(&self, cmd: BookSlotCommand) -> Result<BookSlotResult, BookingError> {
        // 1. Only clients book, for themselves.
        if cmd.caller.role != Role::Client {
            return Err(BookingError::forbidden(
                "Only clients can book training sessions",
            ));
        }

        let now = self.clock.now();

        // 2. Fail fast if the caller holds no usable period.
        let period = self
            .subscriptions
            .select_active_period(&cmd.caller.id, now)
            .await
            .map_err(|e| match e.code {
                ErrorCode::NoActiveSubscription => {
                    BookingError::NoActiveSubscription(cmd.caller.id.clone())
                }
                _ => BookingError::infrastructure(e.to_string()),
            })?;

        // 3. Atomically claim the slot.
        let booking_id = BookingId::new();
        let slot = self
            .slots
            .reserve(&cmd.slot_id, &booking_id, now)
            .await
            .map_err(|e| map_slot_error(cmd.slot_id, e))?;

        // 4. Debit the period. The period was usable at step 2, but a
        //    concurrent booking may have drained it since; the reservation
        //    MUST be rolled back before the error surfaces.
        let period = match self.subscriptions.debit(&period.id).await {
            Ok(period) => period,
            Err(e) => {
                self.rollback_reservation(&cmd.slot_id).await;
                return Err(match e.code {
                    ErrorCode::SubscriptionExhausted => BookingError::SubscriptionExhausted,
                    _ => BookingError::infrastructure(e.to_string()),
                });
            }
        };

        // 5. Record the booking.
        let booking = Booking::create(
            booking_id,
            cmd.caller.id.clone(),
            cmd.slot_id,
            period.id,
            now,
        );
        if let Err(e) = self.bookings.save(&booking).await {
            // Undo in reverse order: credit the debit, then free the slot.
            if let Err(credit_err) = self.subscriptions.credit(&period.id).await {
                tracing::error!(
                    period_id = %period.id,
                    error = %credit_err,
                    "failed to credit period while rolling back booking save"
                );
            }
            self.rollback_reservation(&cmd.slot_id).await;
            return Err(BookingError::infrastructure(e.to_string()));
        }

        tracing::info!(
            booking_id = %booking.id,
            slot_id = %cmd.slot_id,
            client_id = %cmd.caller.id,
            remaining_sessions = period.remaining_sessions(),
            "slot booked"
        );

        Ok(BookSlotResult {
            booking,
            slot,
            remaining_sessions: period.remaining_sessions(),
        })
    }

    /// Release a reservation made earlier in a failed `handle` call.
    ///
    /// The release is synchronous and mandatory; if it fails the slot is
    /// left `booked` without a debit, which the completion sweep cannot fix,
    /// so it is logged at error level for operator attention.
    async fn rollback_reservation(&self, slot_id: &SlotId) {
        if let Err(e) = self.slots.release(slot_id).await {
            tracing::error!(
                slot_id = %slot_id,
                error = %e,
                "failed to release slot while rolling back booking"
            );
        }
    }
}

fn map_slot_error(slot_id: SlotId, e: DomainError) -> BookingError {
    match e.code {
        ErrorCode::SlotNotFound => BookingError::SlotNotFound(slot_id),
        ErrorCode::SlotExpired => BookingError::SlotExpired(slot_id),
        ErrorCode::SlotConflict => BookingError::SlotConflict(slot_id),
        _ => BookingError::infrastructure(e.to_string()),
    }
}
