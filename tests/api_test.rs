//! HTTP tests for the router: GraphQL endpoint, GraphiQL and health.
//!
//! Requests go through the full router with an in-memory SQLite database.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use meetings_api::api::create_router;
use meetings_api::infra::Database;
use meetings_api::{AppState, Config};

// =============================================================================
// Test Helpers
// =============================================================================

async fn app(graphiql: bool) -> Router {
    let database = Database::connect(&Config::in_memory())
        .await
        .expect("in-memory database");
    create_router(AppState::from_database(Arc::new(database)), graphiql)
}

async fn post_graphql(app: &Router, query: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// =============================================================================
// GraphQL endpoint
// =============================================================================

#[tokio::test]
async fn test_graphql_post_round_trip() {
    let app = app(false).await;

    let (status, body) = post_graphql(
        &app,
        r#"mutation { createUser(name: "Ann", email: "ann@example.com") { id name } }"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["createUser"]["name"], "Ann");

    let (status, body) = post_graphql(&app, "{ getAllUsers { name email } }").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["getAllUsers"],
        json!([{ "name": "Ann", "email": "ann@example.com" }])
    );
}

#[tokio::test]
async fn test_graphql_errors_are_reported_in_body() {
    let app = app(false).await;

    let (status, body) = post_graphql(&app, "{ getMeeting(id: 7) { id } }").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errors"][0]["message"], "Meeting with id=7 not found");
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_graphql_rejects_unknown_fields() {
    let app = app(false).await;

    let (_, body) = post_graphql(&app, "{ getAllUsers { password } }").await;

    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
    assert!(body.get("data").map_or(true, Value::is_null));
}

#[tokio::test]
async fn test_graphiql_served_when_enabled() {
    let app = app(true).await;

    let (status, body) = get(&app, "/graphql").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("graphiql"));
}

#[tokio::test]
async fn test_graphiql_hidden_when_disabled() {
    let app = app(false).await;

    let (status, _) = get(&app, "/graphql").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Health and root
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = app(false).await;

    let (status, body) = get(&app, "/health").await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_database_unreachable() {
    let database = Database::connect(&Config::in_memory())
        .await
        .expect("in-memory database");
    database
        .get_connection()
        .close()
        .await
        .expect("close pool");
    let app = create_router(AppState::from_database(Arc::new(database)), false);

    let (status, body) = get(&app, "/health").await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert!(body["services"]["database"]["error"].is_string());
}

#[tokio::test]
async fn test_root() {
    let app = app(false).await;

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Meetings GraphQL API");
}
