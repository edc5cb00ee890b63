//! Request and response DTOs for slot endpoints.
//!
//! Wire shapes mirror what the calendar UI consumes: a slot is presented
//! as a date plus a start time, and status strings are the stable
//! snake_case enumerants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::slot::SlotView;
use crate::domain::foundation::{BookingId, SlotId, Timestamp};
use crate::domain::slot::{Slot, SlotStatus};

/// Query parameters for listing slots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSlotsParams {
    /// First day of the range (inclusive). Defaults to today.
    pub start_date: Option<NaiveDate>,
    /// Last day of the range (inclusive). Defaults to a week out.
    pub end_date: Option<NaiveDate>,
}

impl ListSlotsParams {
    /// Start of the range as a timestamp, if given.
    pub fn from_timestamp(&self) -> Option<Timestamp> {
        self.start_date.map(day_start)
    }

    /// Exclusive end of the range as a timestamp, if given.
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        self.end_date.map(|d| day_start(d).plus_days(1))
    }
}

fn day_start(date: NaiveDate) -> Timestamp {
    Timestamp::from_datetime(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// A slot as presented on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDto {
    pub id: SlotId,
    pub slot_date: NaiveDate,
    /// Start time formatted as `HH:MM` (UTC).
    pub slot_time: String,
    pub duration_minutes: u32,
    pub status: SlotStatus,
    pub booking_id: Option<BookingId>,
    pub block_reason: Option<String>,
}

impl From<SlotView> for SlotDto {
    fn from(view: SlotView) -> Self {
        Self {
            id: view.id,
            slot_date: view.starts_at.date(),
            slot_time: view.starts_at.as_datetime().format("%H:%M").to_string(),
            duration_minutes: view.duration_minutes,
            status: view.status,
            booking_id: view.booking_id,
            block_reason: view.block_reason,
        }
    }
}

impl SlotDto {
    /// Projects a raw slot (e.g. a block/unblock result) at the given instant.
    pub fn from_slot(slot: &Slot, now: Timestamp) -> Self {
        SlotView::project(slot, now).into()
    }
}

/// Response for the slot listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub slots: Vec<SlotDto>,
}

/// Request body for blocking a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSlotRequest {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn view_at(rfc3339: &str) -> SlotView {
        let starts_at = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        );
        SlotView {
            id: SlotId::new(),
            starts_at,
            duration_minutes: 60,
            status: SlotStatus::Available,
            booking_id: None,
            block_reason: None,
        }
    }

    #[test]
    fn dto_splits_start_into_date_and_time() {
        let dto = SlotDto::from(view_at("2026-03-02T09:00:00Z"));
        assert_eq!(dto.slot_date.to_string(), "2026-03-02");
        assert_eq!(dto.slot_time, "09:00");
    }

    #[test]
    fn dto_serializes_status_enumerant() {
        let dto = SlotDto::from(view_at("2026-03-02T09:00:00Z"));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["slot_date"], "2026-03-02");
    }

    #[test]
    fn params_parse_iso_dates() {
        let params: ListSlotsParams =
            serde_json::from_str(r#"{"start_date":"2026-03-02","end_date":"2026-03-05"}"#).unwrap();

        let from = params.from_timestamp().unwrap();
        let to = params.to_timestamp().unwrap();
        assert_eq!(from.date().to_string(), "2026-03-02");
        // End bound is exclusive, one day past the requested last day.
        assert_eq!(to.date().to_string(), "2026-03-06");
    }

    #[test]
    fn empty_params_yield_no_bounds() {
        let params = ListSlotsParams::default();
        assert!(params.from_timestamp().is_none());
        assert!(params.to_timestamp().is_none());
    }
}
