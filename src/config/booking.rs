//! Booking policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::booking::{CancellationPolicy, DEFAULT_CANCELLATION_WINDOW_HOURS};

/// Booking policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Minimum lead time for a refundable client cancellation, in hours
    #[serde(default = "default_cancellation_window")]
    pub cancellation_window_hours: i64,
}

impl BookingConfig {
    /// Build the cancellation policy from this configuration
    pub fn cancellation_policy(&self) -> CancellationPolicy {
        CancellationPolicy::new(self.cancellation_window_hours)
    }

    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cancellation_window_hours < 1 || self.cancellation_window_hours > 168 {
            return Err(ValidationError::InvalidCancellationWindow);
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            cancellation_window_hours: default_cancellation_window(),
        }
    }
}

fn default_cancellation_window() -> i64 {
    DEFAULT_CANCELLATION_WINDOW_HOURS
}
