//! Schema command - Exports the GraphQL SDL.

use crate::api::graphql::schema_sdl;
use crate::cli::args::SchemaArgs;
use crate::errors::{AppError, AppResult};

/// Execute the schema command
pub async fn execute(args: SchemaArgs) -> AppResult<()> {
    let sdl = schema_sdl();

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, sdl).await.map_err(|e| {
                AppError::internal(format!("Failed to write {}: {}", path.display(), e))
            })?;
            tracing::info!("Schema written to {}", path.display());
        }
        None => println!("{}", sdl),
    }

    Ok(())
}
