use axum::extract::State;
use std::sync::Arc;

use super::{respond, ApiResult, AppState};
use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::models::{BulkEnqueueRequest, ClearedQueueResponse, DeletedResponse, EnqueueRequest};
use crate::domain::{QueueEntry, QueueEntryId, QueueEntryView, QueueKind};
use crate::rotation::queue as queue_manager;
use crate::rotation::BulkEnqueueOutcome;

fn parse_kind(raw: &str) -> Result<QueueKind, ApiError> {
    raw.parse().map_err(ApiError::bad_request)
}

pub async fn list_queue(
    State(state): State<Arc<AppState>>,
    ApiPath(kind): ApiPath<String>,
) -> ApiResult<Vec<QueueEntryView>> {
    let kind = parse_kind(&kind)?;
    let store = state.store.lock().await;
    respond(queue_manager::list(&store, kind))
}

pub async fn enqueue_team(
    State(state): State<Arc<AppState>>,
    ApiPath(kind): ApiPath<String>,
    ApiJson(body): ApiJson<EnqueueRequest>,
) -> ApiResult<QueueEntry> {
    let kind = parse_kind(&kind)?;
    let mut store = state.store.lock().await;
    respond(queue_manager::enqueue(&mut store, body.team_id, kind)?)
}

pub async fn bulk_enqueue(
    State(state): State<Arc<AppState>>,
    ApiPath(kind): ApiPath<String>,
    ApiJson(body): ApiJson<BulkEnqueueRequest>,
) -> ApiResult<BulkEnqueueOutcome> {
    let kind = parse_kind(&kind)?;
    let mut store = state.store.lock().await;
    respond(queue_manager::bulk_enqueue(&mut store, &body.team_ids, kind))
}

pub async fn clear_queue(
    State(state): State<Arc<AppState>>,
    ApiPath(kind): ApiPath<String>,
) -> ApiResult<ClearedQueueResponse> {
    let kind = parse_kind(&kind)?;
    let mut store = state.store.lock().await;
    respond(ClearedQueueResponse {
        removed: queue_manager::clear(&mut store, kind),
    })
}

pub async fn dequeue_entry(
    State(state): State<Arc<AppState>>,
    ApiPath(entry_id): ApiPath<QueueEntryId>,
) -> ApiResult<DeletedResponse> {
    let mut store = state.store.lock().await;
    if !queue_manager::dequeue(&mut store, entry_id) {
        return Err(ApiError::not_found(format!("Queue entry {entry_id} not found")));
    }
    respond(DeletedResponse { deleted: true })
}

pub async fn move_entry_to_front(
    State(state): State<Arc<AppState>>,
    ApiPath(entry_id): ApiPath<QueueEntryId>,
) -> ApiResult<QueueEntry> {
    let mut store = state.store.lock().await;
    respond(queue_manager::move_to_front(&mut store, entry_id)?)
}
