//! HTTP adapter for slot endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{BlockSlotRequest, ListSlotsParams, SlotDto, SlotListResponse};
pub use handlers::SlotsAppState;
pub use routes::slot_routes;
