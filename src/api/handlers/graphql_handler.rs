//! GraphQL endpoint and GraphiQL IDE.

use async_graphql::http::GraphiQLSource;
use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Router,
};

use crate::api::AppState;
use crate::config::GRAPHQL_PATH;

/// Create GraphQL routes; GraphiQL is mounted on `GET` only when enabled.
pub fn graphql_routes(graphiql: bool) -> Router<AppState> {
    let route = if graphiql {
        get(graphiql_page).post(graphql)
    } else {
        post(graphql)
    };

    Router::new().route(GRAPHQL_PATH, route)
}

/// Execute a GraphQL request against the schema
pub async fn graphql(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.schema.execute(request).await)
}

/// Serve the GraphiQL IDE pointed at the GraphQL endpoint
pub async fn graphiql_page() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
