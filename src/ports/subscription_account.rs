//! Subscription account port - prepaid session balances.
//!
//! # Design
//!
//! - `debit`/`credit` are atomic counter updates per period id with the same
//!   discipline as slot reservation: two concurrent debits against a
//!   period's last session must yield exactly one success and one
//!   `SubscriptionExhausted`.
//! - The "exactly once per booking" property is the ledger's contract, not
//!   this component's - the primitives are not independently deduplicated.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::SubscriptionPeriod;

/// Account port for SubscriptionPeriod persistence and balance updates.
#[async_trait]
pub trait SubscriptionAccount: Send + Sync {
    /// Pick the period bookings should debit: currently usable (not expired,
    /// not exhausted) with the nearest `valid_until`.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSubscription` if the client holds no usable period.
    async fn select_active_period(
        &self,
        client_id: &UserId,
        now: Timestamp,
    ) -> Result<SubscriptionPeriod, DomainError>;

    /// Atomically consume one session from the period.
    ///
    /// # Errors
    ///
    /// - `NoActiveSubscription` if the period does not exist
    /// - `SubscriptionExhausted` if no sessions remain at the instant of the
    ///   update (a concurrent debit may have drained it)
    async fn debit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError>;

    /// Atomically return one session to the period, floored at zero used.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSubscription` if the period does not exist.
    async fn credit(&self, id: &SubscriptionId) -> Result<SubscriptionPeriod, DomainError>;

    /// All periods a client holds, newest first. Used by the profile view.
    async fn list_for_client(
        &self,
        client_id: &UserId,
    ) -> Result<Vec<SubscriptionPeriod>, DomainError>;
}
