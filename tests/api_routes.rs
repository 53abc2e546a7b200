use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use court_rotation::api::handlers::AppState;
use court_rotation::api::routes::create_router;
use court_rotation::config::AppConfig;
use court_rotation::store::Store;

fn app() -> Router {
    let store = Store::seeded(AppConfig::new()).unwrap();
    create_router(Arc::new(AppState::new(store)))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn court_id(app: &Router, name: &str) -> u64 {
    let (_, body) = call(app, "GET", "/api/courts", None).await;
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["id"].as_u64())
        .unwrap()
}

async fn team_ids(app: &Router) -> Vec<u64> {
    let (_, body) = call(app, "GET", "/api/teams", None).await;
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_seeded_state_is_served() {
    let app = app();

    let (status, body) = call(&app, "GET", "/api/courts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let courts = body["data"].as_array().unwrap();
    assert_eq!(courts.len(), 4);
    assert_eq!(courts[0]["name"], "Kings Court");
    assert_eq!(courts[0]["kind"], "kings");
    assert_eq!(courts[0]["status"], "empty");

    let (_, available) = call(&app, "GET", "/api/available-teams", None).await;
    assert_eq!(available["data"].as_array().unwrap().len(), team_ids(&app).await.len());
}

#[tokio::test]
async fn test_create_team_validation() {
    let app = app();

    let (status, body) = call(&app, "POST", "/api/teams", Some(json!({"name": "Bump Set", "players": ["Jo"]}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Bump Set");

    let (status, body) = call(&app, "POST", "/api/teams", Some(json!({"name": "Bump Set"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Team name 'Bump Set' is already taken");

    let (status, _) = call(&app, "GET", "/api/teams/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_challenger_game_promotes_winner() {
    let app = app();
    let court = court_id(&app, "Court 2").await;
    let ids = team_ids(&app).await;

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/courts/{court}/assign"),
        Some(json!({"team1Id": ids[0], "team2Id": ids[1]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/courts/{court}/report"),
        Some(json!({"team1Score": 21, "team2Score": 17})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["court"]["slot1"], Value::Null);
    assert_eq!(body["data"]["event"]["type"], "game_reported");
    assert_eq!(body["data"]["event"]["score"], "21-17");
    assert!(body["data"]["event"]["description"]
        .as_str()
        .unwrap()
        .contains("advances to Kings Court queue"));

    let (_, queue) = call(&app, "GET", "/api/queue/kings_court", None).await;
    let entries = queue["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["teamId"], ids[0]);
    assert_eq!(entries[0]["position"], 1);

    let (_, stats) = call(&app, "GET", &format!("/api/teams/{}/stats", ids[0]), None).await;
    assert_eq!(stats["data"]["wins"], 1);
}

#[tokio::test]
async fn test_report_rejections() {
    let app = app();
    let court = court_id(&app, "Court 3").await;
    let uri = format!("/api/courts/{court}/report");

    let (status, body) = call(&app, "POST", &uri, Some(json!({"team1Score": 21, "team2Score": 21}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Scores cannot be tied");

    let (status, _) = call(&app, "POST", &uri, Some(json!({"team1Score": -1, "team2Score": 21}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "POST", &uri, Some(json!({"team1Score": 21}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "POST", &uri, Some(json!({"team1Score": 21, "team2Score": 3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Court must have two teams to report a game");

    let (status, _) = call(&app, "POST", "/api/courts/999/report", Some(json!({"team1Score": 21, "team2Score": 3}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_queue_endpoints() {
    let app = app();
    let ids = team_ids(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/queue/general/bulk",
        Some(json!({"teamIds": [ids[0], ids[1], ids[2], 4242]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["added"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["failed"][0]["teamId"], 4242);

    let (status, _) = call(&app, "POST", "/api/queue/general", Some(json!({"teamId": ids[0]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "GET", "/api/queue/vip", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, queue) = call(&app, "GET", "/api/queue/general", None).await;
    let last_entry = queue["data"][2]["id"].as_u64().unwrap();
    let (status, moved) = call(&app, "POST", &format!("/api/queue-entries/{last_entry}/front"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["data"]["position"], 1);

    let (status, _) = call(&app, "DELETE", &format!("/api/queue-entries/{last_entry}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, "DELETE", &format!("/api/queue-entries/{last_entry}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, queue) = call(&app, "GET", "/api/queue/general", None).await;
    let positions: Vec<u64> = queue["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["position"].as_u64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2]);

    let (_, cleared) = call(&app, "DELETE", "/api/queue/general", None).await;
    assert_eq!(cleared["data"]["removed"], 2);
}

#[tokio::test]
async fn test_fill_kings_court_and_delete_rules() {
    let app = app();
    let kings = court_id(&app, "Kings Court").await;
    let ids = team_ids(&app).await;

    call(&app, "POST", "/api/queue/kings_court", Some(json!({"teamId": ids[0]}))).await;
    call(&app, "POST", "/api/queue/general", Some(json!({"teamId": ids[1]}))).await;
    call(&app, "POST", "/api/queue/general", Some(json!({"teamId": ids[2]}))).await;

    let (status, body) = call(&app, "POST", &format!("/api/courts/{kings}/fill"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["court"]["slot1"], ids[0]);
    assert_eq!(body["data"]["court"]["slot2"], ids[1]);

    let (status, body) = call(&app, "DELETE", &format!("/api/teams/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = call(&app, "DELETE", &format!("/api/teams/{}", ids[2]), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, queue) = call(&app, "GET", "/api/queue/general", None).await;
    assert!(queue["data"].as_array().unwrap().is_empty());

    let (_, events) = call(&app, "GET", "/api/events?limit=1", None).await;
    assert_eq!(events["data"][0]["type"], "team_deleted");
}

#[tokio::test]
async fn test_malformed_input_uses_error_envelope() {
    let app = app();
    let court = court_id(&app, "Court 2").await;

    let (status, body) = call(&app, "POST", "/api/queue/general", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("teamId"));

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/courts/{court}/report"),
        Some(json!({"team1Score": 21.5, "team2Score": 17})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = call(&app, "GET", "/api/teams/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = call(&app, "GET", "/api/events?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_unparseable_body_uses_error_envelope() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/teams")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}
