//! GetProfileHandler - aggregated caller profile.
//!
//! Assembles the view the profile page renders: identity, all subscription
//! periods with their derived statuses and remaining balances, and the most
//! recent bookings joined with their slot's schedule data. Bookings whose
//! session has fully elapsed are presented as `completed` even before the
//! reconciliation sweep has run - another read-time derivation, no stored
//! mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::{
    AuthenticatedUser, BookingId, Role, SlotId, SubscriptionId, Timestamp, UserId,
};
use crate::domain::subscription::{SubscriptionPeriod, SubscriptionStatus};
use crate::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

/// Bookings shown on the profile page.
pub const PROFILE_BOOKING_LIMIT: usize = 20;

/// Query for the caller's aggregated profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub caller: AuthenticatedUser,
}

/// Read model for a subscription period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    pub id: SubscriptionId,
    pub total_sessions: u32,
    pub used_sessions: u32,
    pub remaining_sessions: u32,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
    pub status: SubscriptionStatus,
}

impl SubscriptionView {
    fn project(period: &SubscriptionPeriod, now: Timestamp) -> Self {
        Self {
            id: period.id,
            total_sessions: period.total_sessions,
            used_sessions: period.used_sessions,
            remaining_sessions: period.remaining_sessions(),
            valid_from: period.valid_from,
            valid_until: period.valid_until,
            status: period.status(now),
        }
    }
}

/// Read model for a booking with its slot's schedule data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub slot_id: SlotId,
    /// Stored status with `completed` derived for elapsed sessions.
    pub status: BookingStatus,
    pub starts_at: Option<Timestamp>,
    pub duration_minutes: Option<u32>,
    pub created_at: Timestamp,
    pub cancel_reason: Option<String>,
}

/// The aggregated profile response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub user_id: UserId,
    pub role: Role,
    pub email: String,
    pub full_name: Option<String>,
    pub subscriptions: Vec<SubscriptionView>,
    pub bookings: Vec<BookingView>,
}

/// Handler for reading the caller's profile.
pub struct GetProfileHandler {
    slots: Arc<dyn SlotStore>,
    subscriptions: Arc<dyn SubscriptionAccount>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl GetProfileHandler {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        subscriptions: Arc<dyn SubscriptionAccount>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            subscriptions,
            bookings,
            clock,
        }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<ProfileView, BookingError> {
        let now = self.clock.now();
        let caller = query.caller;

        let periods = self
            .subscriptions
            .list_for_client(&caller.id)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        let bookings = self
            .bookings
            .list_for_client(&caller.id, PROFILE_BOOKING_LIMIT)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        let mut booking_views = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            booking_views.push(self.project_booking(booking, now).await?);
        }

        Ok(ProfileView {
            user_id: caller.id,
            role: caller.role,
            email: caller.email,
            full_name: caller.full_name,
            subscriptions: periods
                .iter()
                .map(|p| SubscriptionView::project(p, now))
                .collect(),
            bookings: booking_views,
        })
    }

    async fn project_booking(
        &self,
        booking: &Booking,
        now: Timestamp,
    ) -> Result<BookingView, BookingError> {
        let slot = self
            .slots
            .find_by_id(&booking.slot_id)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        // An active booking whose session has fully elapsed reads as
        // completed even before the sweep has persisted that fact.
        let status = match (&slot, booking.status) {
            (Some(slot), BookingStatus::Active) if slot.has_ended(now) => BookingStatus::Completed,
            _ => booking.status,
        };

        Ok(BookingView {
            id: booking.id,
            slot_id: booking.slot_id,
            status,
            starts_at: slot.as_ref().map(|s| s.starts_at),
            duration_minutes: slot.as_ref().map(|s| s.duration_minutes),
            created_at: booking.created_at,
            cancel_reason: booking.cancel_reason.clone(),
        })
    }
}
