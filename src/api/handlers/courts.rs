use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::{respond, ApiResult, AppState};
use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath};
use crate::api::models::{ApiResponse, AssignRequest, CreateCourtRequest, ReportGameRequest, UpdateCourtRequest};
use crate::domain::{Court, CourtId, CourtKind, CourtView};
use crate::rotation::{self, FillOutcome, GameReport};
use crate::store::courts::{self, CourtPatch};

pub async fn list_courts(State(state): State<Arc<AppState>>) -> ApiResult<Vec<CourtView>> {
    let store = state.store.lock().await;
    respond(courts::list_views(&store))
}

pub async fn create_court(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateCourtRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Court>>), ApiError> {
    let mut store = state.store.lock().await;
    let kind = body.kind.unwrap_or(CourtKind::Challenger);
    let net_color = body.net_color.unwrap_or_default();
    let court = courts::create(&mut store, &body.name, kind, &net_color)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(court))))
}

pub async fn get_court(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
) -> ApiResult<CourtView> {
    let store = state.store.lock().await;
    match courts::view(&store, court_id) {
        Some(view) => respond(view),
        None => Err(ApiError::not_found(format!("Court {court_id} not found"))),
    }
}

pub async fn update_court(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
    ApiJson(body): ApiJson<UpdateCourtRequest>,
) -> ApiResult<Court> {
    let mut store = state.store.lock().await;
    let patch = CourtPatch {
        name: body.name,
        net_color: body.net_color,
        status: body.status,
        score: body.score,
    };
    respond(courts::update(&mut store, court_id, patch)?)
}

pub async fn assign_teams(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
    ApiJson(body): ApiJson<AssignRequest>,
) -> ApiResult<CourtView> {
    let mut store = state.store.lock().await;
    respond(rotation::assign(&mut store, court_id, body.team1_id, body.team2_id)?)
}

pub async fn clear_court(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
) -> ApiResult<CourtView> {
    let mut store = state.store.lock().await;
    respond(rotation::clear(&mut store, court_id)?)
}

pub async fn fill_court(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
) -> ApiResult<FillOutcome> {
    let mut store = state.store.lock().await;
    respond(rotation::fill_from_queue(&mut store, court_id)?)
}

pub async fn report_game(
    State(state): State<Arc<AppState>>,
    ApiPath(court_id): ApiPath<CourtId>,
    ApiJson(body): ApiJson<ReportGameRequest>,
) -> ApiResult<GameReport> {
    let team1_score = parse_score(body.team1_score)?;
    let team2_score = parse_score(body.team2_score)?;
    if team1_score == team2_score {
        return Err(ApiError::bad_request("Scores cannot be tied"));
    }

    let mut store = state.store.lock().await;
    respond(rotation::report_game(&mut store, court_id, team1_score, team2_score)?)
}

fn parse_score(raw: Option<i64>) -> Result<u32, ApiError> {
    raw.and_then(|score| u32::try_from(score).ok())
        .ok_or_else(|| ApiError::bad_request("Both scores are required and must be non-negative integers"))
}
