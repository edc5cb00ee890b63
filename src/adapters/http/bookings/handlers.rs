//! Axum handlers for booking endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::booking::{
    BookSlotCommand, BookSlotHandler, CancelBookingCommand, CancelBookingHandler,
    CompleteElapsedCommand, CompleteElapsedHandler,
};
use crate::domain::booking::CancellationPolicy;
use crate::domain::foundation::BookingId;
use crate::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

use super::dto::{
    BookSlotRequest, BookSlotResponse, CancelBookingRequest, CancelBookingResponse,
    ReconcileResponse,
};

/// Shared state for booking endpoints.
#[derive(Clone)]
pub struct BookingsAppState {
    pub slots: Arc<dyn SlotStore>,
    pub subscriptions: Arc<dyn SubscriptionAccount>,
    pub bookings: Arc<dyn BookingRepository>,
    pub clock: Arc<dyn Clock>,
    pub policy: CancellationPolicy,
}

/// POST / - book a slot for the authenticated client.
pub async fn book_slot(
    State(state): State<BookingsAppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<BookSlotResponse>), ApiError> {
    let handler = BookSlotHandler::new(
        state.slots.clone(),
        state.subscriptions.clone(),
        state.bookings.clone(),
        state.clock.clone(),
    );

    let result = handler
        .handle(BookSlotCommand {
            caller: user,
            slot_id: body.slot_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /:id/cancel - cancel a booking.
pub async fn cancel_booking(
    State(state): State<BookingsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<CancelBookingRequest>,
) -> Result<Json<CancelBookingResponse>, ApiError> {
    let handler = CancelBookingHandler::new(
        state.slots.clone(),
        state.subscriptions.clone(),
        state.bookings.clone(),
        state.clock.clone(),
        state.policy,
    );

    let result = handler
        .handle(CancelBookingCommand {
            caller: user,
            booking_id: BookingId::from_uuid(id),
            reason: body.reason,
        })
        .await?;

    Ok(Json(result.into()))
}

/// POST /reconcile - reclassify elapsed active bookings as completed.
///
/// Idempotent; staff only. Intended to be hit by an external scheduler or
/// an admin action.
pub async fn reconcile_bookings(
    State(state): State<BookingsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let handler = CompleteElapsedHandler::new(
        state.slots.clone(),
        state.bookings.clone(),
        state.clock.clone(),
    );

    let result = handler
        .handle(CompleteElapsedCommand { caller: user })
        .await?;

    Ok(Json(result.into()))
}
