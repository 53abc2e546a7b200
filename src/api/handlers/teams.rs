use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::{respond, ApiResult, AppState};
use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::models::{ApiResponse, CreateTeamRequest, DeletedResponse, UpdateTeamRequest};
use crate::domain::{Team, TeamId};
use crate::rotation::{self, TeamStats};
use crate::store::teams::{self, TeamPatch};

pub async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Team>> {
    let store = state.store.lock().await;
    respond(teams::list_all(&store))
}

pub async fn list_available_teams(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Team>> {
    let store = state.store.lock().await;
    respond(teams::list_available(&store))
}

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>), ApiError> {
    let mut store = state.store.lock().await;
    let team = teams::create(&mut store, &body.name, body.players)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(team))))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    ApiPath(team_id): ApiPath<TeamId>,
) -> ApiResult<Team> {
    let store = state.store.lock().await;
    match teams::find_by_id(&store, team_id) {
        Some(team) => respond(team.clone()),
        None => Err(ApiError::not_found(format!("Team {team_id} not found"))),
    }
}

pub async fn update_team(
    State(state): State<Arc<AppState>>,
    ApiPath(team_id): ApiPath<TeamId>,
    ApiJson(body): ApiJson<UpdateTeamRequest>,
) -> ApiResult<Team> {
    let mut store = state.store.lock().await;
    let patch = TeamPatch {
        name: body.name,
        players: body.players,
    };
    respond(teams::update(&mut store, team_id, patch)?)
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    ApiPath(team_id): ApiPath<TeamId>,
) -> ApiResult<DeletedResponse> {
    let mut store = state.store.lock().await;
    if !teams::delete(&mut store, team_id)? {
        return Err(ApiError::not_found(format!("Team {team_id} not found")));
    }
    respond(DeletedResponse { deleted: true })
}

pub async fn get_team_stats(
    State(state): State<Arc<AppState>>,
    ApiPath(team_id): ApiPath<TeamId>,
) -> ApiResult<TeamStats> {
    let store = state.store.lock().await;
    respond(rotation::team_stats(&store, team_id)?)
}
