//! HTTP request handlers.

pub mod graphql_handler;
pub mod health_handler;

pub use graphql_handler::graphql_routes;
pub use health_handler::health_routes;
