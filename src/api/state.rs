//! Application state shared by every handler.

use std::sync::Arc;

use super::graphql::{build_schema, AppSchema};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Application state containing the schema and infrastructure handles.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema (cheap to clone)
    pub schema: AppSchema,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state with services built over the database pool.
    pub fn from_database(database: Arc<Database>) -> Self {
        let services: Arc<dyn ServiceContainer> =
            Arc::new(Services::from_connection(database.get_connection()));

        Self::new(services, database)
    }

    /// Create application state with manually injected services.
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self {
            schema: build_schema(services),
            database,
        }
    }
}
