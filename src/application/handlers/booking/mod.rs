//! Booking command handlers - the transactional ledger coordinator.

mod book_slot;
mod cancel_booking;
mod complete_elapsed;

pub use book_slot::{BookSlotCommand, BookSlotHandler, BookSlotResult};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler, CancelBookingResult};
pub use complete_elapsed::{
    CompleteElapsedCommand, CompleteElapsedHandler, CompleteElapsedResult,
};
