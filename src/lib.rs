//! Meetings API - GraphQL service for users and meetings
//!
//! Users and meetings joined by a many-to-many attendance relationship,
//! exposed as four queries and six mutations over a relational store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, aggregates and meeting time handling
//! - **services**: Use cases, each run in one unit of work
//! - **infra**: Database, migrations, repositories and transactions
//! - **api**: GraphQL schema, HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Export the GraphQL schema
//! cargo run -- schema -o schema.graphql
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{AppSchema, AppState};
pub use config::Config;
pub use domain::{Meeting, MeetingDetails, User, UserDetails};
pub use errors::{AppError, AppResult};
