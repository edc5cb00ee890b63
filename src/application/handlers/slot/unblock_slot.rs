//! UnblockSlotHandler - lift an administrative block.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode, SlotId};
use crate::domain::slot::Slot;
use crate::ports::SlotStore;

/// Command to unblock a slot.
#[derive(Debug, Clone)]
pub struct UnblockSlotCommand {
    pub caller: AuthenticatedUser,
    pub slot_id: SlotId,
}

/// Handler for unblocking slots. Staff only.
pub struct UnblockSlotHandler {
    slots: Arc<dyn SlotStore>,
}

impl UnblockSlotHandler {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    pub async fn handle(&self, cmd: UnblockSlotCommand) -> Result<Slot, BookingError> {
        if !cmd.caller.role.is_staff() {
            return Err(BookingError::forbidden("Only staff can unblock slots"));
        }

        let slot = self
            .slots
            .unblock(&cmd.slot_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::SlotNotFound => BookingError::SlotNotFound(cmd.slot_id),
                ErrorCode::SlotConflict => BookingError::SlotConflict(cmd.slot_id),
                _ => BookingError::infrastructure(e.to_string()),
            })?;

        tracing::info!(
            slot_id = %cmd.slot_id,
            unblocked_by = %cmd.caller.id,
            "slot unblocked"
        );

        Ok(slot)
    }
}
