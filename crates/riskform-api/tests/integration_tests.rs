//! # Integration Tests for riskform-api
//!
//! Drives the full router: health checks, the risk matrix, session
//! lifecycle, the access gate, both form steps, the table view and the
//! spreadsheet download.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use riskform_api::state::{AppConfig, AppState};

const SECRET: &str = "engineer2024";

/// Helper: build the test app with the gate open.
fn test_app() -> axum::Router {
    riskform_api::app(AppState::new())
}

/// Helper: build the test app with an access secret configured.
fn test_app_with_secret(secret: &str) -> axum::Router {
    let config = AppConfig {
        access_secret: Some(secret.to_string()),
        ..AppConfig::default()
    };
    riskform_api::app(AppState::with_config(config))
}

async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> axum::http::Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

async fn start_session(app: &axum::Router) -> String {
    let response = send(app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

fn wet_floor() -> Value {
    json!({
        "hazard": "Wet floor",
        "consequences": "Slip and fall",
        "consequence_rating": "Significant",
        "likelihood": "Likely",
    })
}

// -- Health Checks ------------------------------------------------------------

#[tokio::test]
async fn test_liveness() {
    let response = send(&test_app(), Method::GET, "/health/liveness", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness() {
    let response = send(&test_app(), Method::GET, "/health/readiness", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_metrics_without_recorder_is_empty() {
    let response = send(&test_app(), Method::GET, "/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn test_openapi_spec() {
    let response = send(&test_app(), Method::GET, "/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/sessions/{session_id}/hazard"].is_object());
}

// -- Risk Matrix --------------------------------------------------------------

#[tokio::test]
async fn test_matrix_has_25_entries() {
    let response = send(&test_app(), Method::GET, "/v1/risk-matrix", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let entries = body_json(response).await;
    assert_eq!(entries.as_array().unwrap().len(), 25);
    assert_eq!(entries[0]["consequence_rating"], "Extensive");
    assert_eq!(entries[0]["likelihood"], "Certain");
    assert_eq!(entries[0]["risk_rating"], "High");
}

#[tokio::test]
async fn test_matrix_lookup() {
    let response = send(
        &test_app(),
        Method::GET,
        "/v1/risk-matrix/lookup?consequence_rating=Major&likelihood=Unlikely",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["risk_rating"], "Medium");
}

#[tokio::test]
async fn test_matrix_lookup_unknown_labels() {
    let response = send(
        &test_app(),
        Method::GET,
        "/v1/risk-matrix/lookup?consequence_rating=Catastrophic&likelihood=Likely",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["risk_rating"], "Unknown");
}

#[tokio::test]
async fn test_matrix_lookup_missing_param_is_bad_request() {
    let response = send(
        &test_app(),
        Method::GET,
        "/v1/risk-matrix/lookup?likelihood=Likely",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Entry Workflow -----------------------------------------------------------

#[tokio::test]
async fn test_two_step_entry_end_to_end() {
    let app = test_app();
    let id = start_session(&app).await;

    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let pending = body_json(response).await;
    assert_eq!(pending["risk_rating"], "Medium");
    assert_eq!(pending["highlight"]["background"], "#fff8b0");

    let session = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await).await;
    assert_eq!(session["stage"], "awaiting_action_input");
    assert_eq!(session["pending"]["hazard"], "Wet floor");

    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": "Place warning sign"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = body_json(response).await;
    assert_eq!(entry["risk_rating"], "Medium");
    assert_eq!(entry["actions"], "Place warning sign");

    let session = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await).await;
    assert_eq!(session["stage"], "awaiting_hazard_input");
    assert!(session["pending"].is_null());
    assert_eq!(session["entry_count"], 1);

    let table = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}/entries"), None).await).await;
    assert_eq!(table["columns"][5], "RiskRating");
    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cells"][0], "Wet floor");
    assert_eq!(rows[0]["cells"][5], "Medium");
    assert_eq!(rows[0]["highlight"]["color"], "#b36b00");
}

#[tokio::test]
async fn test_empty_hazard_is_rejected() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/hazard"),
        Some(json!({
            "hazard": "",
            "consequences": "Slip and fall",
            "consequence_rating": "Minor",
            "likelihood": "Rare",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("please enter both Hazard and Consequences"));

    let session = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await).await;
    assert!(session["pending"].is_null());
}

#[tokio::test]
async fn test_whitespace_text_is_accepted() {
    let app = test_app();
    let id = start_session(&app).await;
    let mut form = wet_floor();
    form["hazard"] = json!("   ");
    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(form)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["hazard"], "   ");

    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": " "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_missing_text_fields_are_validation_errors() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/hazard"),
        Some(json!({"consequence_rating": "Minor", "likelihood": "Rare"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_rating_label_is_bad_request() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/hazard"),
        Some(json!({
            "hazard": "Wet floor",
            "consequences": "Slip and fall",
            "consequence_rating": "Catastrophic",
            "likelihood": "Likely",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_hazard_is_rejected() {
    let app = test_app();
    let id = start_session(&app).await;
    let mut form = wet_floor();
    form["hazard"] = json!("x".repeat(1001));
    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(form)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();
    let id = start_session(&app).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/v1/sessions/{id}/actions"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_actions_without_pending_entry_is_conflict() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": "Place warning sign"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_blank_actions_keep_pending_entry() {
    let app = test_app();
    let id = start_session(&app).await;
    send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;

    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"]["message"]
        .as_str()
        .unwrap()
        .contains("please provide a recommended action"));

    let session = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await).await;
    assert_eq!(session["pending"]["hazard"], "Wet floor");
    assert_eq!(session["entry_count"], 0);
}

#[tokio::test]
async fn test_resubmitting_hazard_replaces_pending_entry() {
    let app = test_app();
    let id = start_session(&app).await;
    send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/hazard"),
        Some(json!({
            "hazard": "Exposed wiring",
            "consequences": "Electrocution",
            "consequence_rating": "Extensive",
            "likelihood": "Probable",
        })),
    )
    .await;
    assert_eq!(body_json(response).await["risk_rating"], "High");

    send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": "Isolate circuit"})),
    )
    .await;
    let table = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}/entries"), None).await).await;
    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cells"][0], "Exposed wiring");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = test_app();
    let a = start_session(&app).await;
    let b = start_session(&app).await;
    send(&app, Method::POST, &format!("/v1/sessions/{a}/hazard"), Some(wet_floor())).await;

    let session_b = body_json(send(&app, Method::GET, &format!("/v1/sessions/{b}"), None).await).await;
    assert!(session_b["pending"].is_null());
}

// -- Session Lifecycle --------------------------------------------------------

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let uri = format!("/v1/sessions/{}/entries", uuid::Uuid::new_v4());
    let response = send(&test_app(), Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ending_session_drops_it() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(&app, Method::DELETE, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&app, Method::DELETE, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Access Gate --------------------------------------------------------------

#[tokio::test]
async fn test_open_gate_sessions_start_unlocked() {
    let app = test_app();
    let response = send(&app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(body_json(response).await["authenticated"], true);
}

#[tokio::test]
async fn test_locked_session_is_unauthorized() {
    let app = test_app_with_secret(SECRET);
    let id = start_session(&app).await;

    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}/entries"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}/export"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_locked_session_is_checked_before_the_form() {
    let app = test_app_with_secret(SECRET);
    let id = start_session(&app).await;

    let mut oversized = wet_floor();
    oversized["hazard"] = json!("x".repeat(1001));
    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(oversized)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/v1/sessions/{id}/actions"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_session_is_checked_before_the_form() {
    let app = test_app();
    let id = uuid::Uuid::new_v4();
    let mut form = wet_floor();
    form["likelihood"] = json!("Often");
    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(form)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_limit_is_service_unavailable() {
    let state = AppState::with_config(AppConfig {
        access_secret: Some(SECRET.to_string()),
        max_sessions: 2,
        ..AppConfig::default()
    });
    let app = riskform_api::app(state.clone());
    let first = start_session(&app).await;
    start_session(&app).await;

    let response = send(&app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"]["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(state.sessions.len(), 2);

    let response = send(&app, Method::DELETE, &format!("/v1/sessions/{first}"), None).await;
    assert!(response.status().is_success());
    start_session(&app).await;
    assert_eq!(state.sessions.len(), 2);
}

#[tokio::test]
async fn test_idle_sessions_expire() {
    let state = AppState::with_config(AppConfig {
        session_idle_timeout: std::time::Duration::ZERO,
        ..AppConfig::default()
    });
    let app = riskform_api::app(state.clone());
    let id = start_session(&app).await;
    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let app = test_app_with_secret(SECRET);
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/unlock"),
        Some(json!({"secret": "guess"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let session = body_json(send(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await).await;
    assert_eq!(session["authenticated"], false);
}

#[tokio::test]
async fn test_correct_secret_unlocks_workflow() {
    let app = test_app_with_secret(SECRET);
    let id = start_session(&app).await;
    let response = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/unlock"),
        Some(json!({"secret": SECRET})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], true);

    let response = send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Export -------------------------------------------------------------------

#[tokio::test]
async fn test_export_download() {
    let app = test_app();
    let id = start_session(&app).await;
    send(&app, Method::POST, &format!("/v1/sessions/{id}/hazard"), Some(wet_floor())).await;
    send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{id}/actions"),
        Some(json!({"actions": "Place warning sign"})),
    )
    .await;

    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}/export"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"risk_assessment_"));
    assert!(disposition.ends_with(".xlsx\""));

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[tokio::test]
async fn test_export_of_empty_table() {
    let app = test_app();
    let id = start_session(&app).await;
    let response = send(&app, Method::GET, &format!("/v1/sessions/{id}/export"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.starts_with(b"PK"));
}
