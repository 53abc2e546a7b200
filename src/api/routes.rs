use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{courts, events, queue, teams, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route("/api/available-teams", get(teams::list_available_teams))
        .route(
            "/api/teams/:id",
            get(teams::get_team).put(teams::update_team).delete(teams::delete_team),
        )
        .route("/api/teams/:id/stats", get(teams::get_team_stats))
        .route("/api/courts", get(courts::list_courts).post(courts::create_court))
        .route("/api/courts/:id", get(courts::get_court).put(courts::update_court))
        .route("/api/courts/:id/assign", post(courts::assign_teams))
        .route("/api/courts/:id/clear", post(courts::clear_court))
        .route("/api/courts/:id/fill", post(courts::fill_court))
        .route("/api/courts/:id/report", post(courts::report_game))
        .route(
            "/api/queue/:kind",
            get(queue::list_queue).post(queue::enqueue_team).delete(queue::clear_queue),
        )
        .route("/api/queue/:kind/bulk", post(queue::bulk_enqueue))
        .route("/api/queue-entries/:id", delete(queue::dequeue_entry))
        .route("/api/queue-entries/:id/front", post(queue::move_entry_to_front))
        .route("/api/events", get(events::list_events))
        .route("/api/stats", get(events::get_standings))
        .with_state(state)
}
