//! Axum handlers for slot endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::slot::{
    BlockSlotCommand, BlockSlotHandler, ListSlotsHandler, ListSlotsQuery, UnblockSlotCommand,
    UnblockSlotHandler,
};
use crate::domain::foundation::SlotId;
use crate::ports::{Clock, SlotStore};

use super::dto::{BlockSlotRequest, ListSlotsParams, SlotDto, SlotListResponse};

/// Shared state for slot endpoints.
#[derive(Clone)]
pub struct SlotsAppState {
    pub slots: Arc<dyn SlotStore>,
    pub clock: Arc<dyn Clock>,
}

/// GET / - list the schedule for a date range.
///
/// Public: the calendar is visible without authentication.
pub async fn list_slots(
    State(state): State<SlotsAppState>,
    Query(params): Query<ListSlotsParams>,
) -> Result<Json<SlotListResponse>, ApiError> {
    let handler = ListSlotsHandler::new(state.slots.clone(), state.clock.clone());
    let views = handler
        .handle(ListSlotsQuery {
            from: params.from_timestamp(),
            to: params.to_timestamp(),
        })
        .await?;

    Ok(Json(SlotListResponse {
        slots: views.into_iter().map(SlotDto::from).collect(),
    }))
}

/// POST /:id/block - administratively withhold a slot.
pub async fn block_slot(
    State(state): State<SlotsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
    Json(body): Json<BlockSlotRequest>,
) -> Result<Json<SlotDto>, ApiError> {
    if body.reason.trim().is_empty() {
        return Err(ApiError::bad_request("Block reason cannot be empty"));
    }

    let handler = BlockSlotHandler::new(state.slots.clone());
    let slot = handler
        .handle(BlockSlotCommand {
            caller: user,
            slot_id: SlotId::from_uuid(id),
            reason: body.reason,
        })
        .await?;

    Ok(Json(SlotDto::from_slot(&slot, state.clock.now())))
}

/// POST /:id/unblock - lift an administrative block.
pub async fn unblock_slot(
    State(state): State<SlotsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotDto>, ApiError> {
    let handler = UnblockSlotHandler::new(state.slots.clone());
    let slot = handler
        .handle(UnblockSlotCommand {
            caller: user,
            slot_id: SlotId::from_uuid(id),
        })
        .await?;

    Ok(Json(SlotDto::from_slot(&slot, state.clock.now())))
}
