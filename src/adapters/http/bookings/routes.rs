//! Axum router configuration for booking endpoints.

use axum::{routing::post, Router};

use super::handlers::{book_slot, cancel_booking, reconcile_bookings, BookingsAppState};

/// Create the bookings API router.
///
/// # Routes
///
/// ## Client Endpoints (require authentication)
/// - `POST /` - Book a slot against the caller's active subscription
/// - `POST /:id/cancel` - Cancel a booking (window rules apply to clients)
///
/// ## Staff Endpoints (require staff role)
/// - `POST /reconcile` - Mark elapsed active bookings as completed
pub fn booking_routes() -> Router<BookingsAppState> {
    Router::new()
        .route("/", post(book_slot))
        .route("/:id/cancel", post(cancel_booking))
        .route("/reconcile", post(reconcile_bookings))
}
