//! Axum router configuration for the profile endpoint.

use axum::{routing::get, Router};

use super::handlers::{get_profile, ProfileAppState};

/// Create the profile API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `GET /` - Aggregated profile: identity, subscriptions, recent bookings
pub fn profile_routes() -> Router<ProfileAppState> {
    Router::new().route("/", get(get_profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::SystemClock;
    use crate::adapters::memory::{
        InMemoryBookingRepository, InMemorySlotStore, InMemorySubscriptionAccount,
    };
    use std::sync::Arc;

    fn test_state() -> ProfileAppState {
        ProfileAppState {
            slots: Arc::new(InMemorySlotStore::new()),
            subscriptions: Arc::new(InMemorySubscriptionAccount::new()),
            bookings: Arc::new(InMemoryBookingRepository::new()),
            clock: Arc::new(SystemClock::new()),
        }
    }

    #[test]
    fn profile_routes_creates_router() {
        let router = profile_routes();
        let _: Router<()> = router.with_state(test_state());
    }
}
