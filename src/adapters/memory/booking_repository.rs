//! In-memory implementation of BookingRepository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, UserId};
use crate::ports::BookingRepository;

/// Lock-guarded map of bookings keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
}

impl InMemoryBookingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        self.bookings
            .write()
            .unwrap()
            .insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().unwrap();
        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id),
            ));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().unwrap().get(id).cloned())
    }

    async fn list_for_client(
        &self,
        client_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().unwrap();
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| &b.client_id == client_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        Ok(result)
    }

    async fn list_active(&self) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().unwrap();
        Ok(bookings.values().filter(|b| b.is_active()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::CancellingActor;
    use crate::domain::foundation::{Role, SlotId, SubscriptionId, Timestamp};

    fn client() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn booking_at(created_at: Timestamp) -> Booking {
        Booking::create(
            BookingId::new(),
            client(),
            SlotId::new(),
            SubscriptionId::new(),
            created_at,
        )
    }

    #[tokio::test]
    async fn save_then_find_roundtrips() {
        let repo = InMemoryBookingRepository::new();
        let booking = booking_at(Timestamp::now());

        repo.save(&booking).await.unwrap();
        let found = repo.find_by_id(&booking.id).await.unwrap();
        assert_eq!(found, Some(booking));
    }

    #[tokio::test]
    async fn update_replaces_stored_booking() {
        let repo = InMemoryBookingRepository::new();
        let mut booking = booking_at(Timestamp::now());
        repo.save(&booking).await.unwrap();

        booking
            .cancel(
                "changed plans",
                CancellingActor {
                    user_id: client(),
                    role: Role::Client,
                },
                Timestamp::now(),
            )
            .unwrap();
        repo.update(&booking).await.unwrap();

        let found = repo.find_by_id(&booking.id).await.unwrap().unwrap();
        assert!(!found.is_active());
    }

    #[tokio::test]
    async fn update_unknown_booking_fails() {
        let repo = InMemoryBookingRepository::new();
        let booking = booking_at(Timestamp::now());

        let err = repo.update(&booking).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BookingNotFound);
    }

    #[tokio::test]
    async fn list_for_client_orders_newest_first_and_caps() {
        let repo = InMemoryBookingRepository::new();
        let base = Timestamp::now();
        for i in 0..5 {
            repo.save(&booking_at(base.plus_days(i))).await.unwrap();
        }

        let listed = repo.list_for_client(&client(), 3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed[0].created_at > listed[1].created_at);
        assert!(listed[1].created_at > listed[2].created_at);
    }

    #[tokio::test]
    async fn list_for_client_ignores_other_clients() {
        let repo = InMemoryBookingRepository::new();
        repo.save(&booking_at(Timestamp::now())).await.unwrap();

        let other = UserId::new("client-2").unwrap();
        let listed = repo.list_for_client(&other, 10).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn list_active_excludes_cancelled() {
        let repo = InMemoryBookingRepository::new();
        let active = booking_at(Timestamp::now());
        let mut cancelled = booking_at(Timestamp::now());
        cancelled
            .cancel(
                "gone",
                CancellingActor {
                    user_id: client(),
                    role: Role::Client,
                },
                Timestamp::now(),
            )
            .unwrap();
        repo.save(&active).await.unwrap();
        repo.save(&cancelled).await.unwrap();

        let listed = repo.list_active().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, active.id);
    }
}
