//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod attendance;
pub mod meeting;
pub mod user;
