//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are separated from query handlers (read).

pub mod handlers;

pub use handlers::booking::{
    BookSlotCommand, BookSlotHandler, BookSlotResult, CancelBookingCommand,
    CancelBookingHandler, CancelBookingResult, CompleteElapsedCommand, CompleteElapsedHandler,
    CompleteElapsedResult,
};
pub use handlers::profile::{GetProfileHandler, GetProfileQuery, ProfileView};
pub use handlers::slot::{
    BlockSlotCommand, BlockSlotHandler, ListSlotsHandler, ListSlotsQuery, SlotView,
    UnblockSlotCommand, UnblockSlotHandler,
};
