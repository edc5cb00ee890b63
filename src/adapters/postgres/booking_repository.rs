//! PostgreSQL implementation of BookingRepository.
//!
//! A partial unique index on `bookings(slot_id) WHERE status = 'active'`
//! backs the one-active-booking-per-slot invariant at the storage level,
//! in addition to the SlotStore's reservation CAS.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus, CancellingActor};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, Role, SlotId, SubscriptionId, Timestamp, UserId,
};
use crate::ports::BookingRepository;

/// PostgreSQL implementation of the BookingRepository port.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Creates a new PostgresBookingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    client_id: String,
    slot_id: Uuid,
    subscription_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
    cancel_reason: Option<String>,
    cancelled_by_id: Option<String>,
    cancelled_by_role: Option<String>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let cancelled_by = match (row.cancelled_by_id, row.cancelled_by_role) {
            (Some(id), Some(role)) => Some(CancellingActor {
                user_id: UserId::new(id).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid cancelled_by_id: {}", e),
                    )
                })?,
                role: parse_role(&role)?,
            }),
            _ => None,
        };

        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            client_id: UserId::new(row.client_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid client_id: {}", e))
            })?,
            slot_id: SlotId::from_uuid(row.slot_id),
            subscription_id: SubscriptionId::from_uuid(row.subscription_id),
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
            cancel_reason: row.cancel_reason,
            cancelled_by,
        })
    }
}

fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s {
        "active" => Ok(BookingStatus::Active),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid booking status value: {}", s),
        )),
    }
}

fn status_to_string(status: &BookingStatus) -> &'static str {
    match status {
        BookingStatus::Active => "active",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Completed => "completed",
    }
}

fn parse_role(s: &str) -> Result<Role, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid cancelled_by_role value: {}", s),
        )
    })
}

fn role_to_string(role: &Role) -> &'static str {
    match role {
        Role::Client => "client",
        Role::Trainer => "trainer",
        Role::Admin => "admin",
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, client_id, slot_id, subscription_id, status,
                created_at, cancelled_at, cancel_reason, cancelled_by_id, cancelled_by_role
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.client_id.as_str())
        .bind(booking.slot_id.as_uuid())
        .bind(booking.subscription_id.as_uuid())
        .bind(status_to_string(&booking.status))
        .bind(booking.created_at.as_datetime())
        .bind(booking.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(&booking.cancel_reason)
        .bind(booking.cancelled_by.as_ref().map(|a| a.user_id.as_str()))
        .bind(booking.cancelled_by.as_ref().map(|a| role_to_string(&a.role)))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("bookings_one_active_per_slot") {
                    return DomainError::new(
                        ErrorCode::SlotConflict,
                        "Slot already has an active booking",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save booking: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2,
                cancelled_at = $3,
                cancel_reason = $4,
                cancelled_by_id = $5,
                cancelled_by_role = $6
            WHERE id = $1
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(status_to_string(&booking.status))
        .bind(booking.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(&booking.cancel_reason)
        .bind(booking.cancelled_by.as_ref().map(|a| a.user_id.as_str()))
        .bind(booking.cancelled_by.as_ref().map(|a| role_to_string(&a.role)))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update booking: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, slot_id, subscription_id, status,
                   created_at, cancelled_at, cancel_reason, cancelled_by_id, cancelled_by_role
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load booking: {}", e))
        })?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_for_client(
        &self,
        client_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, slot_id, subscription_id, status,
                   created_at, cancelled_at, cancel_reason, cancelled_by_id, cancelled_by_role
            FROM bookings
            WHERE client_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(client_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_active(&self) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, slot_id, subscription_id, status,
                   created_at, cancelled_at, cancel_reason, cancelled_by_id, cancelled_by_role
            FROM bookings
            WHERE status = 'active'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list active bookings: {}", e),
            )
        })?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_roundtrips_stored_values() {
        for status in [
            BookingStatus::Active,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(parse_status(status_to_string(&status)).unwrap(), status);
        }
    }

    #[test]
    fn parse_status_rejects_unknown_values() {
        assert!(parse_status("pending").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn parse_role_roundtrips_stored_values() {
        for role in [Role::Client, Role::Trainer, Role::Admin] {
            assert_eq!(parse_role(role_to_string(&role)).unwrap(), role);
        }
    }

    #[test]
    fn booking_row_converts_to_aggregate() {
        let now = Utc::now();
        let row = BookingRow {
            id: Uuid::new_v4(),
            client_id: "client-1".to_string(),
            slot_id: Uuid::new_v4(),
            subscription_id: Uuid::new_v4(),
            status: "cancelled".to_string(),
            created_at: now,
            cancelled_at: Some(now),
            cancel_reason: Some("schedule change".to_string()),
            cancelled_by_id: Some("client-1".to_string()),
            cancelled_by_role: Some("client".to_string()),
        };

        let booking = Booking::try_from(row).unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.cancel_reason.as_deref(), Some("schedule change"));
        assert_eq!(booking.cancelled_by.unwrap().role, Role::Client);
    }

    #[test]
    fn booking_row_without_actor_converts_with_none() {
        let row = BookingRow {
            id: Uuid::new_v4(),
            client_id: "client-1".to_string(),
            slot_id: Uuid::new_v4(),
            subscription_id: Uuid::new_v4(),
            status: "active".to_string(),
            created_at: Utc::now(),
            cancelled_at: None,
            cancel_reason: None,
            cancelled_by_id: None,
            cancelled_by_role: None,
        };

        let booking = Booking::try_from(row).unwrap();
        assert!(booking.cancelled_by.is_none());
    }
}
