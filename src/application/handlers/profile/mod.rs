//! Profile query handlers.

mod get_profile;

pub use get_profile::{
    BookingView, GetProfileHandler, GetProfileQuery, ProfileView, SubscriptionView,
    PROFILE_BOOKING_LIMIT,
};
