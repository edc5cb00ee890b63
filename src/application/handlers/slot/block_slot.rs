//! BlockSlotHandler - administratively withhold a slot.

use std::sync::Arc;

use crate::domain::booking::BookingError;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode, SlotId};
use crate::domain::slot::Slot;
use crate::ports::SlotStore;

/// Command to block a slot.
#[derive(Debug, Clone)]
pub struct BlockSlotCommand {
    pub caller: AuthenticatedUser,
    pub slot_id: SlotId,
    pub reason: String,
}

/// Handler for blocking slots. Staff only; a booked slot cannot be blocked
/// (cancel the booking first).
pub struct BlockSlotHandler {
    slots: Arc<dyn SlotStore>,
}

impl BlockSlotHandler {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self { slots }
    }

    pub async fn handle(&self, cmd: BlockSlotCommand) -> Result<Slot, BookingError> {
        if !cmd.caller.role.is_staff() {
            return Err(BookingError::forbidden("Only staff can block slots"));
        }

        let slot = self
            .slots
            .block(&cmd.slot_id, &cmd.reason)
            .await
            .map_err(|e| match e.code {
                ErrorCode::SlotNotFound => BookingError::SlotNotFound(cmd.slot_id),
                ErrorCode::SlotConflict => BookingError::SlotConflict(cmd.slot_id),
                _ => BookingError::infrastructure(e.to_string()),
            })?;

        tracing::info!(
            slot_id = %cmd.slot_id,
            blocked_by = %cmd.caller.id,
            "slot blocked"
        );

        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySlotStore;
    use crate::domain::foundation::{BookingId, Role, Timestamp, UserId};
    use crate::domain::slot::SlotStatus;

    fn trainer() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("trainer-1").unwrap(),
            Role::Trainer,
            "trainer@example.com",
            None,
        )
    }

    fn client() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("client-1").unwrap(),
            Role::Client,
            "client@example.com",
            None,
        )
    }

    fn seeded_store() -> (Arc<InMemorySlotStore>, SlotId) {
        let slots = Arc::new(InMemorySlotStore::new());
        let slot = Slot::new(SlotId::new(), Timestamp::now().plus_days(1), 60);
        let slot_id = slot.id;
        slots.insert(slot);
        (slots, slot_id)
    }

    #[tokio::test]
    async fn trainer_blocks_available_slot_with_reason() {
        let (slots, slot_id) = seeded_store();
        let handler = BlockSlotHandler::new(slots);

        let slot = handler
            .handle(BlockSlotCommand {
                caller: trainer(),
                slot_id,
                reason: "equipment maintenance".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(slot.status, SlotStatus::Blocked);
        assert_eq!(slot.block_reason.as_deref(), Some("equipment maintenance"));
    }

    #[tokio::test]
    async fn client_cannot_block() {
        let (slots, slot_id) = seeded_store();
        let handler = BlockSlotHandler::new(slots);

        let result = handler
            .handle(BlockSlotCommand {
                caller: client(),
                slot_id,
                reason: "nope".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden(_))));
    }

    #[tokio::test]
    async fn blocking_booked_slot_fails_with_conflict() {
        let (slots, slot_id) = seeded_store();
        slots
            .reserve(&slot_id, &BookingId::new(), Timestamp::now())
            .await
            .unwrap();
        let handler = BlockSlotHandler::new(slots);

        let result = handler
            .handle(BlockSlotCommand {
                caller: trainer(),
                slot_id,
                reason: "too late".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::SlotConflict(_))));
    }

    #[tokio::test]
    async fn blocking_unknown_slot_fails_with_not_found() {
        let (slots, _) = seeded_store();
        let handler = BlockSlotHandler::new(slots);

        let result = handler
            .handle(BlockSlotCommand {
                caller: trainer(),
                slot_id: SlotId::new(),
                reason: "missing".to_string(),
            })
            .await;

        assert!(matches!(result, Err(BookingError::SlotNotFound(_))));
    }
}
