//! GraphQL schema: query/mutation roots and output types.

mod schema;
pub mod types;

pub use schema::{build_schema, schema_sdl, AppSchema, MutationRoot, QueryRoot};
