//! HTTP adapter for booking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BookSlotRequest, BookSlotResponse, BookingDto, CancelBookingRequest, CancelBookingResponse,
    ReconcileResponse,
};
pub use handlers::BookingsAppState;
pub use routes::booking_routes;
