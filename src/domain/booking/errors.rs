//! Ledger-specific error types.
//!
//! Every failure a `book` or `cancel` call can surface, with a
//! distinguishable kind. `SlotConflict` and `SubscriptionExhausted` are
//! expected under load and must be presentable as "slot just taken" /
//! "no sessions left" rather than as system faults.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthorized | 401 |
//! | Forbidden | 403 |
//! | SlotNotFound / BookingNotFound | 404 |
//! | SlotConflict | 409 |
//! | SlotExpired | 410 |
//! | NoActiveSubscription | 402 |
//! | SubscriptionExhausted | 409 |
//! | CancellationWindowExpired | 409 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SlotId, UserId};

/// Errors surfaced by the booking ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Caller is not authenticated.
    Unauthorized,

    /// Caller is authenticated but lacks the role for this action.
    Forbidden(String),

    /// The slot identifier is unknown.
    SlotNotFound(SlotId),

    /// The booking identifier is unknown, or the booking is no longer active.
    BookingNotFound(BookingId),

    /// The slot was reserved or blocked by a concurrent caller.
    SlotConflict(SlotId),

    /// The slot's start time has already elapsed.
    SlotExpired(SlotId),

    /// The client holds no usable subscription period.
    NoActiveSubscription(UserId),

    /// The subscription balance hit zero during the transaction.
    SubscriptionExhausted,

    /// Client attempted to cancel inside the lock window.
    CancellationWindowExpired,

    /// Infrastructure error (storage, etc.).
    Infrastructure(String),
}

impl BookingError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        BookingError::Forbidden(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Unauthorized => ErrorCode::Unauthorized,
            BookingError::Forbidden(_) => ErrorCode::Forbidden,
            BookingError::SlotNotFound(_) => ErrorCode::SlotNotFound,
            BookingError::BookingNotFound(_) => ErrorCode::BookingNotFound,
            BookingError::SlotConflict(_) => ErrorCode::SlotConflict,
            BookingError::SlotExpired(_) => ErrorCode::SlotExpired,
            BookingError::NoActiveSubscription(_) => ErrorCode::NoActiveSubscription,
            BookingError::SubscriptionExhausted => ErrorCode::SubscriptionExhausted,
            BookingError::CancellationWindowExpired => ErrorCode::CancellationWindowExpired,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BookingError::Unauthorized => "Authentication required".to_string(),
            BookingError::Forbidden(reason) => reason.clone(),
            BookingError::SlotNotFound(id) => format!("Slot not found: {}", id),
            BookingError::BookingNotFound(id) => format!("Booking not found: {}", id),
            BookingError::SlotConflict(id) => {
                format!("Slot {} is no longer available", id)
            }
            BookingError::SlotExpired(id) => format!("Slot {} has already started", id),
            BookingError::NoActiveSubscription(user_id) => {
                format!("No active subscription with available sessions for {}", user_id)
            }
            BookingError::SubscriptionExhausted => {
                "No sessions remaining on the subscription".to_string()
            }
            BookingError::CancellationWindowExpired => {
                "The cancellation window for this booking has passed".to_string()
            }
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true for outcomes that are expected when callers race each
    /// other, as opposed to genuine faults.
    pub fn is_contention(&self) -> bool {
        self.code().is_contention()
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthorized => BookingError::Unauthorized,
            ErrorCode::Forbidden => BookingError::Forbidden(err.message),
            ErrorCode::SubscriptionExhausted => BookingError::SubscriptionExhausted,
            ErrorCode::CancellationWindowExpired => BookingError::CancellationWindowExpired,
            // Id-carrying variants are constructed at the call site where the
            // id is known; anything else arriving here is infrastructure.
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
