//! API layer - GraphQL schema and HTTP surface
//!
//! This module contains all request-facing concerns:
//! - GraphQL schema, resolvers and output types
//! - HTTP handlers (GraphQL endpoint, GraphiQL, health)
//! - Route definitions and shared state

pub mod graphql;
pub mod handlers;
pub mod routes;
pub mod state;

pub use graphql::{build_schema, AppSchema};
pub use routes::create_router;
pub use state::AppState;
