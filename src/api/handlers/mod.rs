use axum::Json;
use tokio::sync::Mutex;

use crate::api::errors::ApiError;
use crate::api::models::ApiResponse;
use crate::store::Store;

pub mod courts;
pub mod events;
pub mod queue;
pub mod teams;

/// Shared server state
///
/// One lock guards the whole store, so each request's validate, mutate and
/// log steps happen as a single unit.
pub struct AppState {
    pub store: Mutex<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub(crate) fn respond<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}
