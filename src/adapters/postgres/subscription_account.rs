//! PostgreSQL implementation of SubscriptionAccount.
//!
//! Debit is a conditional UPDATE guarded by `used_sessions <
//! total_sessions`, so concurrent debits against a period's last session
//! resolve to exactly one updated row. Credit floors at zero in SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, SubscriptionId, Timestamp, UserId,
};
use crate::domain::subscription::SubscriptionPeriod;
use crate::ports::SubscriptionAccount;

/// PostgreSQL implementation of the SubscriptionAccount port.
pub struct PostgresSubscriptionAccount {
    pool: PgPool,
}

impl PostgresSubscriptionAccount {
    /// Creates a new PostgresSubscriptionAccount with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &SubscriptionId) -> Result<bool, DomainError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM subscriptions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to load subscription: {}", e),
                )
            })?;
        Ok(row.is_some())
    }
}

/// Database row representation of a subscription period.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    client_id: String,
    total_sessions: i32,
    used_sessions: i32,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for SubscriptionPeriod {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(SubscriptionPeriod {
            id: SubscriptionId::from_uuid(row.id),
            client_id: UserId::new(row.client_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid client_id: {}", e))
            })?,
            total_sessions: row.total_sessions as u32,
            used_sessions: row.used_sessions as u32,
            valid_from: Timestamp::from_datetime(row.valid_from),
            valid_until: Timestamp::from_datetime(row.valid_until),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl SubscriptionAccount for PostgresSubscriptionAccount {
    async fn select_active_period(
        &self,
        client_id: &UserId,
        now: Timestamp,
    ) -> Result<SubscriptionPeriod, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, total_sessions, used_sessions,
                   valid_from, valid_until, created_at
            FROM subscriptions
            WHERE client_id = $1
              AND valid_until::date >= $2::date
              AND used_sessions < total_sessions
            ORDER BY valid_until ASC
            LIMIT 1
            "#,
        )
        .bind(client_id.as_str())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to select subscription: {}", e),
            )
        })?;

        match row {
            Some(row) => SubscriptionPeriod::try_from(row),
            None => Err(DomainError::new(
                ErrorCode::NoActiveSubscription,
                format!("No active subscription for client {}", client_id),
            )),
        }
    }

    async fn debit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            UPDATE subscriptions
            SET used_sessions = used_sessions + 1
            WHERE id = $1 AND used_sessions < total_sessions
            RETURNING id, client_id, total_sessions, used_sessions,
                      valid_from, valid_until, created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to debit subscription: {}", e),
            )
        })?;

        match row {
            Some(row) => SubscriptionPeriod::try_from(row),
            None if self.exists(id).await? => Err(DomainError::new(
                ErrorCode::SubscriptionExhausted,
                format!("Subscription period {} has no sessions left", id),
            )),
            None => Err(DomainError::new(
                ErrorCode::NoActiveSubscription,
                format!("Subscription period not found: {}", id),
            )),
        }
    }

    async fn credit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            UPDATE subscriptions
            SET used_sessions = GREATEST(used_sessions - 1, 0)
            WHERE id = $1
            RETURNING id, client_id, total_sessions, used_sessions,
                      valid_from, valid_until, created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to credit subscription: {}", e),
            )
        })?;

        match row {
            Some(row) => SubscriptionPeriod::try_from(row),
            None => Err(DomainError::new(
                ErrorCode::NoActiveSubscription,
                format!("Subscription period not found: {}", id),
            )),
        }
    }

    async fn list_for_client(
        &self,
        client_id: &UserId,
    ) -> Result<Vec<SubscriptionPeriod>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, total_sessions, used_sessions,
                   valid_from, valid_until, created_at
            FROM subscriptions
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list subscriptions: {}", e),
            )
        })?;

        rows.into_iter().map(SubscriptionPeriod::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_row_converts_to_aggregate() {
        let uuid = Uuid::new_v4();
        let now = Utc::now();
        let row = SubscriptionRow {
            id: uuid,
            client_id: "client-1".to_string(),
            total_sessions: 8,
            used_sessions: 3,
            valid_from: now,
            valid_until: now,
            created_at: now,
        };

        let period = SubscriptionPeriod::try_from(row).unwrap();
        assert_eq!(period.id, SubscriptionId::from_uuid(uuid));
        assert_eq!(period.client_id.as_str(), "client-1");
        assert_eq!(period.remaining_sessions(), 5);
    }

    #[test]
    fn subscription_row_rejects_empty_client_id() {
        let now = Utc::now();
        let row = SubscriptionRow {
            id: Uuid::new_v4(),
            client_id: String::new(),
            total_sessions: 8,
            used_sessions: 0,
            valid_from: now,
            valid_until: now,
            created_at: now,
        };

        assert!(SubscriptionPeriod::try_from(row).is_err());
    }
}
