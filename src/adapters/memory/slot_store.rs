//! In-memory implementation of SlotStore.
//!
//! Backs tests and local development. The check-and-set discipline the port
//! demands is provided by performing every status check and mutation inside
//! one critical section over the slot map: two concurrent `reserve` calls
//! for the same slot observe the check and the set as a single step, so
//! exactly one wins.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SlotId, Timestamp};
use crate::domain::slot::Slot;
use crate::ports::SlotStore;

/// Lock-guarded map of slots keyed by id.
#[derive(Debug, Default)]
pub struct InMemorySlotStore {
    slots: RwLock<HashMap<SlotId, Slot>>,
}

impl InMemorySlotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot. Slot creation is an external administrative process;
    /// this stands in for it.
    pub fn insert(&self, slot: Slot) {
        self.slots.write().unwrap().insert(slot.id, slot);
    }

    /// Number of slots in the store.
    pub fn len(&self) -> usize {
        self.slots.read().unwrap().len()
    }

    /// Returns true if the store holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.read().unwrap().is_empty()
    }

    fn with_slot<F>(&self, id: &SlotId, mutate: F) -> Result<Slot, DomainError>
    where
        F: FnOnce(&mut Slot) -> Result<(), DomainError>,
    {
        let mut slots = self.slots.write().unwrap();
        let slot = slots.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SlotNotFound, format!("Slot not found: {}", id))
        })?;
        mutate(slot)?;
        Ok(slot.clone())
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn list(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Slot>, DomainError> {
        let slots = self.slots.read().unwrap();
        let mut result: Vec<Slot> = slots
            .values()
            .filter(|s| !s.starts_at.is_before(&from) && s.starts_at.is_before(&to))
            .cloned()
            .collect();
        result.sort_by_key(|s| s.starts_at);
        Ok(result)
    }

    async fn find_by_id(&self, id: &SlotId) -> Result<Option<Slot>, DomainError> {
        Ok(self.slots.read().unwrap().get(id).cloned())
    }

    async fn reserve(
        &self,
        id: &SlotId,
        booking_id: &BookingId,
        now: Timestamp,
    ) -> Result<Slot, DomainError> {
        self.with_slot(id, |slot| slot.reserve(*booking_id, now))
    }

    async fn release(&self, id: &SlotId) -> Result<Slot, DomainError> {
        self.with_slot(id, |slot| slot.release())
    }

    async fn block(&self, id: &SlotId, reason: &str) -> Result<Slot, DomainError> {
        self.with_slot(id, |slot| slot.block(reason))
    }

    async fn unblock(&self, id: &SlotId) -> Result<Slot, DomainError> {
        self.with_slot(id, |slot| slot.unblock())
    }
}
