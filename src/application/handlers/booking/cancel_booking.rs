//! CancelBookingHandler - the cancellation half of the ledger.
//!
//! Reverses a booking's slot reservation and, when the policy says the
//! cancellation is refundable, credits the session back to the debited
//! period. The cancellation policy is evaluated before any state changes;
//! a denied cancellation leaves the booking, the slot, and the balance
//! untouched.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, CancellationPolicy, CancellingActor};
use crate::domain::foundation::{AuthenticatedUser, BookingId, ErrorCode};
use crate::domain::slot::Slot;
use crate::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

/// Default reason recorded when the caller provides none.
const DEFAULT_CANCEL_REASON: &str = "Cancelled by client";

/// Command to cancel a booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub caller: AuthenticatedUser,
    pub booking_id: BookingId,
    pub reason: Option<String>,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelBookingResult {
    pub booking: Booking,
    pub slot: Slot,
    /// Whether the debited session was credited back.
    pub refunded: bool,
}

/// Handler for cancelling bookings.
///
/// The booking's owning client, or any staff member, may cancel. Clients
/// are bound by the cancellation window; staff may cancel any time before
/// the session starts and always refund.
pub struct CancelBookingHandler {
    slots: Arc<dyn SlotStore>,
    subscriptions: Arc<dyn SubscriptionAccount>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    policy: CancellationPolicy,
}

impl CancelBookingHandler {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        subscriptions: Arc<dyn SubscriptionAccount>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        policy: CancellationPolicy,
    ) -> Self {
        Self {
            slots,
            subscriptions,
            bookings,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<CancelBookingResult, BookingError> {
        // 1. Resolve the booking; anything non-active reads as not found.
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?
            .filter(|b| b.is_active())
            .ok_or(BookingError::BookingNotFound(cmd.booking_id))?;

        // 2. Owner or staff only.
        if !booking.is_owned_by(&cmd.caller.id) && !cmd.caller.role.is_staff() {
            return Err(BookingError::forbidden(
                "Only the booking owner or staff can cancel a booking",
            ));
        }

        // 3. Evaluate the policy before touching any state.
        let slot = self
            .slots
            .find_by_id(&booking.slot_id)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                BookingError::infrastructure(format!(
                    "Booking {} references missing slot {}",
                    booking.id, booking.slot_id
                ))
            })?;

        let now = self.clock.now();
        let outcome = self.policy.evaluate(now, slot.starts_at, cmd.caller.role);
        if !outcome.is_permitted() {
            tracing::warn!(
                booking_id = %booking.id,
                caller_id = %cmd.caller.id,
                role = %cmd.caller.role,
                "cancellation denied inside lock window"
            );
            return Err(BookingError::CancellationWindowExpired);
        }

        // 4. Free the slot.
        let slot = self
            .slots
            .release(&booking.slot_id)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        // 5. Credit the session back unless the outcome forfeits it.
        let refunded = outcome.is_refundable();
        if refunded {
            if let Err(e) = self.subscriptions.credit(&booking.subscription_id).await {
                // Undo the release so the ledger is not left half-reversed.
                if let Err(reserve_err) = self
                    .slots
                    .reserve(&booking.slot_id, &booking.id, now)
                    .await
                {
                    tracing::error!(
                        slot_id = %booking.slot_id,
                        error = %reserve_err,
                        "failed to restore reservation while rolling back cancellation"
                    );
                }
                return Err(match e.code {
                    ErrorCode::NoActiveSubscription => BookingError::infrastructure(format!(
                        "Booking {} references missing period {}",
                        booking.id, booking.subscription_id
                    )),
                    _ => BookingError::infrastructure(e.to_string()),
                });
            }
        }

        // 6. Record the cancellation.
        let reason = cmd
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());
        let actor = CancellingActor {
            user_id: cmd.caller.id.clone(),
            role: cmd.caller.role,
        };
        booking
            .cancel(reason, actor, now)
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;
        self.bookings
            .update(&booking)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        tracing::info!(
            booking_id = %booking.id,
            slot_id = %booking.slot_id,
            cancelled_by = %cmd.caller.id,
            refunded,
            "booking cancelled"
        );

        Ok(CancelBookingResult {
            booking,
            slot,
            refunded,
        })
    }
}
