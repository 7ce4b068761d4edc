//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (SQLite file, created on first use)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://meetings.db?mode=rwc";

/// Default upper bound for pooled database connections
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// GraphQL
// =============================================================================

/// HTTP path serving both the GraphQL endpoint and the GraphiQL IDE
pub const GRAPHQL_PATH: &str = "/graphql";

/// Maximum selection depth accepted by the schema
pub const MAX_QUERY_DEPTH: usize = 10;

// =============================================================================
// Meetings
// =============================================================================

/// Wire format of a meeting's time of day
pub const MEETING_TIME_FORMAT: &str = "%H:%M";
