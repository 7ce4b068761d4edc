//! Application route configuration.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{graphql_routes, health_routes};
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState, graphiql: bool) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(health_routes())
        .merge(graphql_routes(graphiql))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Meetings GraphQL API"
}
