//! Slot query and administrative handlers.

mod block_slot;
mod list_slots;
mod unblock_slot;

pub use block_slot::{BlockSlotCommand, BlockSlotHandler};
pub use list_slots::{
    ListSlotsHandler, ListSlotsQuery, SlotView, DEFAULT_LISTING_DAYS,
};
pub use unblock_slot::{UnblockSlotCommand, UnblockSlotHandler};
