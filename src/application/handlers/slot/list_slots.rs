//! ListSlotsHandler - read-only schedule query.
//!
//! Produces the slot views the calendar renders. The `past` status is
//! derived from the clock at read time; listing never mutates anything,
//! so repeated reads are stable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingError;
use crate::domain::foundation::{BookingId, SlotId, Timestamp};
use crate::domain::slot::{Slot, SlotStatus};
use crate::ports::{Clock, SlotStore};

/// Days of schedule returned when the caller gives no end date.
pub const DEFAULT_LISTING_DAYS: i64 = 7;

/// Query for a date range of slots.
#[derive(Debug, Clone, Default)]
pub struct ListSlotsQuery {
    /// Start of the range; defaults to now.
    pub from: Option<Timestamp>,
    /// End of the range; defaults to `from` plus seven days.
    pub to: Option<Timestamp>,
}

/// Read model for a slot as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: SlotId,
    pub starts_at: Timestamp,
    pub duration_minutes: u32,
    /// Effective status, with `past` derived from the clock.
    pub status: SlotStatus,
    pub booking_id: Option<BookingId>,
    pub block_reason: Option<String>,
}

impl SlotView {
    /// Projects a slot into its read model at the given instant.
    pub fn project(slot: &Slot, now: Timestamp) -> Self {
        Self {
            id: slot.id,
            starts_at: slot.starts_at,
            duration_minutes: slot.duration_minutes,
            status: slot.effective_status(now),
            booking_id: slot.booking_id,
            block_reason: slot.block_reason.clone(),
        }
    }
}

/// Handler for listing the schedule. No authentication required.
pub struct ListSlotsHandler {
    slots: Arc<dyn SlotStore>,
    clock: Arc<dyn Clock>,
}

impl ListSlotsHandler {
    pub fn new(slots: Arc<dyn SlotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { slots, clock }
    }

    pub async fn handle(&self, query: ListSlotsQuery) -> Result<Vec<SlotView>, BookingError> {
        let now = self.clock.now();
        let from = query.from.unwrap_or(now);
        let to = query.to.unwrap_or_else(|| from.plus_days(DEFAULT_LISTING_DAYS));

        let slots = self
            .slots
            .list(from, to)
            .await
            .map_err(|e| BookingError::infrastructure(e.to_string()))?;

        Ok(slots
            .iter()
            .map(|slot| SlotView::project(slot, now))
            .collect())
    }
}
