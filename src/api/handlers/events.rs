use axum::extract::State;
use std::sync::Arc;

use super::{respond, ApiResult, AppState};
use crate::api::extractors::ApiQuery;
use crate::api::models::EventParams;
use crate::domain::GameEvent;
use crate::rotation::{self, TeamStanding};
use crate::store::events;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<EventParams>,
) -> ApiResult<Vec<GameEvent>> {
    let store = state.store.lock().await;
    let mut history = match params.court_id {
        Some(court_id) => events::for_court(&store, court_id),
        None => events::recent(&store, None),
    };
    if let Some(limit) = params.limit {
        history.truncate(limit);
    }
    respond(history)
}

pub async fn get_standings(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TeamStanding>> {
    let store = state.store.lock().await;
    respond(rotation::standings(&store))
}
