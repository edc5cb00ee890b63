//! Request and response DTOs for booking endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::booking::{
    BookSlotResult, CancelBookingResult, CompleteElapsedResult,
};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, SlotId, SubscriptionId, Timestamp};

/// Request body for creating a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSlotRequest {
    pub slot_id: SlotId,
}

/// Request body for cancelling a booking.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

/// A booking as presented on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub subscription_id: SubscriptionId,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
    pub cancel_reason: Option<String>,
}

impl From<&Booking> for BookingDto {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            slot_id: booking.slot_id,
            subscription_id: booking.subscription_id,
            status: booking.status,
            created_at: booking.created_at,
            cancelled_at: booking.cancelled_at,
            cancel_reason: booking.cancel_reason.clone(),
        }
    }
}

/// Response for a successful booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotResponse {
    pub booking: BookingDto,
    pub remaining_sessions: u32,
}

impl From<BookSlotResult> for BookSlotResponse {
    fn from(result: BookSlotResult) -> Self {
        Self {
            booking: BookingDto::from(&result.booking),
            remaining_sessions: result.remaining_sessions,
        }
    }
}

/// Response for a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    pub booking: BookingDto,
    pub refunded: bool,
}

impl From<CancelBookingResult> for CancelBookingResponse {
    fn from(result: CancelBookingResult) -> Self {
        Self {
            booking: BookingDto::from(&result.booking),
            refunded: result.refunded,
        }
    }
}

/// Response for the completion sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub completed: Vec<BookingId>,
}

impl From<CompleteElapsedResult> for ReconcileResponse {
    fn from(result: CompleteElapsedResult) -> Self {
        Self {
            completed: result.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn booking_dto_carries_stable_status_string() {
        let booking = Booking::create(
            BookingId::new(),
            UserId::new("client-1").unwrap(),
            SlotId::new(),
            SubscriptionId::new(),
            Timestamp::now(),
        );

        let json = serde_json::to_value(BookingDto::from(&booking)).unwrap();
        assert_eq!(json["status"], "active");
        assert!(json["cancel_reason"].is_null());
    }

    #[test]
    fn cancel_request_tolerates_missing_reason() {
        let req: CancelBookingRequest = serde_json::from_str("{}").unwrap();
        assert!(req.reason.is_none());
    }

    #[test]
    fn cancel_request_parses_reason() {
        let req: CancelBookingRequest =
            serde_json::from_str(r#"{"reason":"feeling unwell"}"#).unwrap();
        assert_eq!(req.reason.as_deref(), Some("feeling unwell"));
    }
}
