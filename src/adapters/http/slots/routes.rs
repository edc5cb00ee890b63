//! Axum router configuration for slot endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{block_slot, list_slots, unblock_slot, SlotsAppState};

/// Create the slots API router.
///
/// # Routes
///
/// ## Public Endpoints
/// - `GET /` - List slots for a date range (defaults to the coming week)
///
/// ## Staff Endpoints (require authentication + staff role)
/// - `POST /:id/block` - Block an available slot with a reason
/// - `POST /:id/unblock` - Restore a blocked slot to available
pub fn slot_routes() -> Router<SlotsAppState> {
    Router::new()
        .route("/", get(list_slots))
        .route("/:id/block", post(block_slot))
        .route("/:id/unblock", post(unblock_slot))
}
