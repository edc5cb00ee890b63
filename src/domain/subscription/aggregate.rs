//! SubscriptionPeriod aggregate entity.
//!
//! A prepaid allotment of sessions with validity dates, owned by the
//! SubscriptionAccount. Periods are created by an external purchase flow;
//! the ledger only moves the `used_sessions` counter, exactly once per
//! booking debit and once per refundable cancellation credit.
//!
//! # Invariants
//!
//! - `used_sessions <= total_sessions`
//! - `remaining = total_sessions - used_sessions`
//! - Status is derived, never set: `Exhausted` iff `remaining == 0`,
//!   `Expired` iff the current date is past `valid_until`
//! - Periods are never deleted, only superseded by new ones

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::SubscriptionStatus;

/// A client's prepaid session allotment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPeriod {
    /// Unique identifier for this period.
    pub id: SubscriptionId,

    /// The client who owns this period.
    pub client_id: UserId,

    /// Total sessions purchased.
    pub total_sessions: u32,

    /// Sessions consumed so far.
    pub used_sessions: u32,

    /// Start of the validity window.
    pub valid_from: Timestamp,

    /// End of the validity window (inclusive date).
    pub valid_until: Timestamp,

    /// When the period was created.
    pub created_at: Timestamp,
}

impl SubscriptionPeriod {
    /// Creates a new untouched period.
    ///
    /// Provisioning periods is an external purchase concern; this
    /// constructor exists for adapters and tests.
    pub fn new(
        id: SubscriptionId,
        client_id: UserId,
        total_sessions: u32,
        valid_from: Timestamp,
        valid_until: Timestamp,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            client_id,
            total_sessions,
            used_sessions: 0,
            valid_from,
            valid_until,
            created_at: now,
        }
    }

    /// Sessions still available on this period.
    pub fn remaining_sessions(&self) -> u32 {
        self.total_sessions.saturating_sub(self.used_sessions)
    }

    /// Returns true once the validity window has passed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.date() > self.valid_until.date()
    }

    /// The derived status at the given instant.
    pub fn status(&self, now: Timestamp) -> SubscriptionStatus {
        if self.is_expired(now) {
            SubscriptionStatus::Expired
        } else if self.remaining_sessions() == 0 {
            SubscriptionStatus::Exhausted
        } else {
            SubscriptionStatus::Active
        }
    }

    /// Returns true if a booking can be debited against this period now.
    pub fn is_usable(&self, now: Timestamp) -> bool {
        self.status(now).is_usable()
    }

    /// Consume one session.
    ///
    /// The "exactly once per booking" guarantee is the ledger's contract;
    /// this is a plain counter update guarded by the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionExhausted` if no sessions remain.
    pub fn debit(&mut self) -> Result<(), DomainError> {
        if self.remaining_sessions() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionExhausted,
                format!("Subscription period {} has no sessions left", self.id),
            ));
        }
        self.used_sessions += 1;
        Ok(())
    }

    /// Return one session, floored at zero used.
    pub fn credit(&mut self) {
        self.used_sessions = self.used_sessions.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> UserId {
        UserId::new("client-123").unwrap()
    }

    fn period_with(total: u32, used: u32) -> SubscriptionPeriod {
        let now = Timestamp::now();
        let mut period = SubscriptionPeriod::new(
            SubscriptionId::new(),
            test_client(),
            total,
            now.minus_days(10),
            now.plus_days(20),
        );
        period.used_sessions = used;
        period
    }

    // Counter invariants

    #[test]
    fn remaining_is_total_minus_used() {
        let period = period_with(8, 3);
        assert_eq!(period.remaining_sessions(), 5);
    }

    #[test]
    fn debit_increments_used_once() {
        let mut period = period_with(8, 3);
        period.debit().unwrap();
        assert_eq!(period.used_sessions, 4);
        assert_eq!(period.remaining_sessions(), 4);
    }

    #[test]
    fn debit_fails_when_exhausted() {
        let mut period = period_with(4, 4);
        let err = period.debit().unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionExhausted);
        assert_eq!(period.used_sessions, 4);
    }

    #[test]
    fn debit_never_exceeds_total() {
        let mut period = period_with(1, 0);
        period.debit().unwrap();
        assert!(period.debit().is_err());
        assert!(period.used_sessions <= period.total_sessions);
    }

    #[test]
    fn credit_decrements_used() {
        let mut period = period_with(8, 3);
        period.credit();
        assert_eq!(period.used_sessions, 2);
    }

    #[test]
    fn credit_floors_at_zero() {
        let mut period = period_with(8, 0);
        period.credit();
        assert_eq!(period.used_sessions, 0);
    }

    #[test]
    fn debit_then_credit_restores_balance() {
        let mut period = period_with(8, 3);
        let before = period.remaining_sessions();
        period.debit().unwrap();
        period.credit();
        assert_eq!(period.remaining_sessions(), before);
    }

    // Derived status

    #[test]
    fn status_active_when_valid_and_sessions_remain() {
        let period = period_with(8, 3);
        assert_eq!(period.status(Timestamp::now()), SubscriptionStatus::Active);
        assert!(period.is_usable(Timestamp::now()));
    }

    #[test]
    fn status_exhausted_iff_no_sessions_remain() {
        let period = period_with(4, 4);
        assert_eq!(
            period.status(Timestamp::now()),
            SubscriptionStatus::Exhausted
        );
    }

    #[test]
    fn status_expired_when_past_valid_until() {
        let period = period_with(8, 3);
        let after_expiry = period.valid_until.plus_days(1);
        assert_eq!(period.status(after_expiry), SubscriptionStatus::Expired);
    }

    #[test]
    fn expiry_takes_precedence_over_exhaustion() {
        let period = period_with(4, 4);
        let after_expiry = period.valid_until.plus_days(1);
        assert_eq!(period.status(after_expiry), SubscriptionStatus::Expired);
    }

    #[test]
    fn period_usable_on_its_last_valid_day() {
        let period = period_with(8, 3);
        assert!(period.is_usable(period.valid_until));
    }

    #[test]
    fn status_is_derived_not_stored() {
        // Draining the counter flips the derived status with no explicit set.
        let mut period = period_with(1, 0);
        assert_eq!(period.status(Timestamp::now()), SubscriptionStatus::Active);
        period.debit().unwrap();
        assert_eq!(
            period.status(Timestamp::now()),
            SubscriptionStatus::Exhausted
        );
        period.credit();
        assert_eq!(period.status(Timestamp::now()), SubscriptionStatus::Active);
    }
}
