//! PostgreSQL implementation of SlotStore.
//!
//! The reservation primitive is a single conditional UPDATE keyed by slot
//! id: the row only moves to `booked` if it is still `available` and has
//! not started, so two racing callers get exactly one updated row between
//! them. The loser's zero-row result is diagnosed into `SlotNotFound` /
//! `SlotExpired` / `SlotConflict` with a follow-up read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SlotId, Timestamp,
};
use crate::domain::slot::{Slot, SlotStatus};
use crate::ports::SlotStore;

/// PostgreSQL implementation of the SlotStore port.
pub struct PostgresSlotStore {
    pool: PgPool,
}

impl PostgresSlotStore {
    /// Creates a new PostgresSlotStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: &SlotId) -> Result<Option<Slot>, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            r#"
            SELECT id, starts_at, duration_minutes, status, booking_id, block_reason
            FROM training_slots
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load slot: {}", e))
        })?;

        row.map(Slot::try_from).transpose()
    }

    /// Explains a zero-row conditional update on a reservation attempt.
    async fn diagnose_reserve_failure(
        &self,
        id: &SlotId,
        now: Timestamp,
    ) -> Result<DomainError, DomainError> {
        match self.fetch(id).await? {
            None => Ok(DomainError::new(
                ErrorCode::SlotNotFound,
                format!("Slot not found: {}", id),
            )),
            Some(slot) if slot.has_started(now) => Ok(DomainError::new(
                ErrorCode::SlotExpired,
                format!("Slot {} has already started", id),
            )),
            Some(_) => Ok(DomainError::new(
                ErrorCode::SlotConflict,
                format!("Slot {} is no longer available", id),
            )),
        }
    }
}

/// Database row representation of a slot.
#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    id: Uuid,
    starts_at: DateTime<Utc>,
    duration_minutes: i32,
    status: String,
    booking_id: Option<Uuid>,
    block_reason: Option<String>,
}

impl TryFrom<SlotRow> for Slot {
    type Error = DomainError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        Ok(Slot {
            id: SlotId::from_uuid(row.id),
            starts_at: Timestamp::from_datetime(row.starts_at),
            duration_minutes: row.duration_minutes as u32,
            status: parse_status(&row.status)?,
            booking_id: row.booking_id.map(BookingId::from_uuid),
            block_reason: row.block_reason,
        })
    }
}

fn parse_status(s: &str) -> Result<SlotStatus, DomainError> {
    match s {
        "available" => Ok(SlotStatus::Available),
        "booked" => Ok(SlotStatus::Booked),
        "blocked" => Ok(SlotStatus::Blocked),
        // `past` is derived at read time and never stored
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid slot status value: {}", s),
        )),
    }
}

#[async_trait]
impl SlotStore for PostgresSlotStore {
    async fn list(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Slot>, DomainError> {
        let rows: Vec<SlotRow> = sqlx::query_as(
            r#"
            SELECT id, starts_at, duration_minutes, status, booking_id, block_reason
            FROM training_slots
            WHERE starts_at >= $1 AND starts_at < $2
            ORDER BY starts_at
            "#,
        )
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list slots: {}", e))
        })?;

        rows.into_iter().map(Slot::try_from).collect()
    }

    async fn find_by_id(&self, id: &SlotId) -> Result<Option<Slot>, DomainError> {
        self.fetch(id).await
    }

    async fn reserve(
        &self,
        id: &SlotId,
        booking_id: &BookingId,
        now: Timestamp,
    ) -> Result<Slot, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            r#"
            UPDATE training_slots
            SET status = 'booked', booking_id = $2
            WHERE id = $1 AND status = 'available' AND starts_at > $3
            RETURNING id, starts_at, duration_minutes, status, booking_id, block_reason
            "#,
        )
        .bind(id.as_uuid())
        .bind(booking_id.as_uuid())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to reserve slot: {}", e))
        })?;

        match row {
            Some(row) => Slot::try_from(row),
            None => Err(self.diagnose_reserve_failure(id, now).await?),
        }
    }

    async fn release(&self, id: &SlotId) -> Result<Slot, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            r#"
            UPDATE training_slots
            SET status = 'available', booking_id = NULL
            WHERE id = $1 AND status = 'booked'
            RETURNING id, starts_at, duration_minutes, status, booking_id, block_reason
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to release slot: {}", e))
        })?;

        match row {
            Some(row) => Slot::try_from(row),
            None => match self.fetch(id).await? {
                None => Err(DomainError::new(
                    ErrorCode::SlotNotFound,
                    format!("Slot not found: {}", id),
                )),
                Some(_) => Err(DomainError::new(
                    ErrorCode::SlotConflict,
                    format!("Slot {} is not booked", id),
                )),
            },
        }
    }

    async fn block(&self, id: &SlotId, reason: &str) -> Result<Slot, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            r#"
            UPDATE training_slots
            SET status = 'blocked', block_reason = $2
            WHERE id = $1 AND status = 'available'
            RETURNING id, starts_at, duration_minutes, status, booking_id, block_reason
            "#,
        )
        .bind(id.as_uuid())
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to block slot: {}", e))
        })?;

        match row {
            Some(row) => Slot::try_from(row),
            None => match self.fetch(id).await? {
                None => Err(DomainError::new(
                    ErrorCode::SlotNotFound,
                    format!("Slot not found: {}", id),
                )),
                Some(_) => Err(DomainError::new(
                    ErrorCode::SlotConflict,
                    format!("Slot {} is not available to block", id),
                )),
            },
        }
    }

    async fn unblock(&self, id: &SlotId) -> Result<Slot, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            r#"
            UPDATE training_slots
            SET status = 'available', block_reason = NULL
            WHERE id = $1 AND status = 'blocked'
            RETURNING id, starts_at, duration_minutes, status, booking_id, block_reason
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to unblock slot: {}", e))
        })?;

        match row {
            Some(row) => Slot::try_from(row),
            None => match self.fetch(id).await? {
                None => Err(DomainError::new(
                    ErrorCode::SlotNotFound,
                    format!("Slot not found: {}", id),
                )),
                Some(_) => Err(DomainError::new(
                    ErrorCode::SlotConflict,
                    format!("Slot {} is not blocked", id),
                )),
            },
        }
    }
}
