//! Axum handlers for the profile endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::profile::{GetProfileHandler, GetProfileQuery};
use crate::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

use super::dto::ProfileResponse;

/// Shared state for profile endpoints.
#[derive(Clone)]
pub struct ProfileAppState {
    pub slots: Arc<dyn SlotStore>,
    pub subscriptions: Arc<dyn SubscriptionAccount>,
    pub bookings: Arc<dyn BookingRepository>,
    pub clock: Arc<dyn Clock>,
}

/// GET / - the authenticated caller's aggregated profile.
pub async fn get_profile(
    State(state): State<ProfileAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ProfileResponse>, ApiError> {
    let handler = GetProfileHandler::new(
        state.slots.clone(),
        state.subscriptions.clone(),
        state.bookings.clone(),
        state.clock.clone(),
    );

    let view = handler.handle(GetProfileQuery { caller: user }).await?;
    Ok(Json(view.into()))
}
