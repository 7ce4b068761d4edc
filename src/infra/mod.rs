//! Infrastructure layer - External systems integration
//!
//! This module handles all storage concerns:
//! - Database connections and migrations
//! - Transaction-scoped repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{NewMeeting, TxAttendanceRepository, TxMeetingRepository, TxUserRepository};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
