//! Response DTOs for the profile endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::profile::{BookingView, ProfileView, SubscriptionView};
use crate::domain::foundation::{Role, UserId};

/// The caller's identity block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUserDto {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
}

/// Aggregated profile response: identity, subscriptions, recent bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: ProfileUserDto,
    pub subscriptions: Vec<SubscriptionView>,
    pub bookings: Vec<BookingView>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            user: ProfileUserDto {
                id: view.user_id,
                email: view.email,
                full_name: view.full_name,
                role: view.role,
            },
            subscriptions: view.subscriptions,
            bookings: view.bookings,
        }
    }
}
