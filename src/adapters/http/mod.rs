//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod bookings;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod slots;

use axum::{routing::get, Router};

use self::bookings::{booking_routes, BookingsAppState};
use self::middleware::{auth_middleware, AuthState};
use self::profile::{profile_routes, ProfileAppState};
use self::slots::{slot_routes, SlotsAppState};

pub use error::ApiError;

/// Assemble the complete API router.
///
/// Routes are nested per module; the auth middleware runs for every
/// request and injects the verified caller where a Bearer token is
/// present. Public routes simply never read it.
pub fn api_router(
    slots_state: SlotsAppState,
    bookings_state: BookingsAppState,
    profile_state: ProfileAppState,
    auth_state: AuthState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/slots", slot_routes().with_state(slots_state))
        .nest("/api/bookings", booking_routes().with_state(bookings_state))
        .nest("/api/profile", profile_routes().with_state(profile_state))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
}

async fn health() -> &'static str {
    "ok"
}
