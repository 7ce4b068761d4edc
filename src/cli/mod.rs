//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `schema` - Export the GraphQL SDL

pub mod args;

pub use args::{Cli, Commands};
