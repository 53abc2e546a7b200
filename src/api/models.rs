use serde::{Deserialize, Serialize};

use crate::domain::{CourtId, CourtKind, CourtStatus, TeamId};

/// Envelope for every successful response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub players: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
    pub name: String,
    pub kind: Option<CourtKind>,
    pub net_color: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourtRequest {
    pub name: Option<String>,
    pub net_color: Option<String>,
    pub status: Option<CourtStatus>,
    pub score: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
}

/// Scores arrive loosely typed so missing or negative values get a 400
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGameRequest {
    pub team1_score: Option<i64>,
    pub team2_score: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueRequest {
    pub team_id: TeamId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEnqueueRequest {
    pub team_ids: Vec<TeamId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    pub limit: Option<usize>,
    pub court_id: Option<CourtId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedQueueResponse {
    pub removed: usize,
}
