//! HTTP error mapping.
//!
//! Translates ledger errors into API responses with stable machine-readable
//! codes. Contention outcomes (`SLOT_CONFLICT`, `SUBSCRIPTION_EXHAUSTED`)
//! keep their distinct codes so clients can present "slot just taken"
//! differently from a system fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::booking::BookingError;
use crate::domain::foundation::ErrorCode;

/// API error response carrying a status, a stable code, and a message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 Bad Request with a validation code.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        (
            self.status,
            Json(serde_json::json!({
                "error": self.message,
                "code": self.code.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let status = match err.code() {
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::SlotNotFound | ErrorCode::BookingNotFound => StatusCode::NOT_FOUND,
            ErrorCode::SlotConflict
            | ErrorCode::SubscriptionExhausted
            | ErrorCode::CancellationWindowExpired => StatusCode::CONFLICT,
            ErrorCode::SlotExpired => StatusCode::GONE,
            ErrorCode::NoActiveSubscription => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.code(), err.message())
    }
}
