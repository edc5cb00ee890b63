//! In-memory implementation of SubscriptionAccount.
//!
//! Debit and credit run inside one critical section over the period map,
//! giving the atomic-counter discipline the port demands: two concurrent
//! debits against a period's last session yield exactly one success and
//! one exhaustion failure.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::SubscriptionPeriod;
use crate::ports::SubscriptionAccount;

/// Lock-guarded map of subscription periods keyed by id.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionAccount {
    periods: RwLock<HashMap<SubscriptionId, SubscriptionPeriod>>,
}

impl InMemorySubscriptionAccount {
    /// Creates an empty account store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a period. Provisioning is an external purchase process; this
    /// stands in for it.
    pub fn insert(&self, period: SubscriptionPeriod) {
        self.periods.write().unwrap().insert(period.id, period);
    }
}

#[async_trait]
impl SubscriptionAccount for InMemorySubscriptionAccount {
    async fn select_active_period(
        &self,
        client_id: &UserId,
        now: Timestamp,
    ) -> Result<SubscriptionPeriod, DomainError> {
        let periods = self.periods.read().unwrap();
        periods
            .values()
            .filter(|p| &p.client_id == client_id && p.is_usable(now))
            .min_by_key(|p| p.valid_until)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NoActiveSubscription,
                    format!("No active subscription for client {}", client_id),
                )
            })
    }

    async fn debit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError> {
        let mut periods = self.periods.write().unwrap();
        let period = periods.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::NoActiveSubscription,
                format!("Subscription period not found: {}", id),
            )
        })?;
        period.debit()?;
        Ok(period.clone())
    }

    async fn credit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError> {
        let mut periods = self.periods.write().unwrap();
        let period = periods.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::NoActiveSubscription,
                format!("Subscription period not found: {}", id),
            )
        })?;
        period.credit();
        Ok(period.clone())
    }

    async fn list_for_client(
        &self,
        client_id: &UserId,
    ) -> Result<Vec<SubscriptionPeriod>, DomainError> {
        let periods = self.periods.read().unwrap();
        let mut result: Vec<SubscriptionPeriod> = periods
            .values()
            .filter(|p| &p.client_id == client_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}
