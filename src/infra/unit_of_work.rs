//! Unit of Work pattern implementation.
//!
//! Every request runs inside exactly one unit of work: a database
//! transaction opened before the first lookup and committed (or rolled
//! back) before the response is produced. Repositories are only reachable
//! through the [`TransactionContext`] handed to the closure, so nothing can
//! touch the store outside a transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    IsolationLevel, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;

use super::repositories::{TxAttendanceRepository, TxMeetingRepository, TxUserRepository};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by a unit-of-work closure, borrowing the transaction.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not object-safe due to generic methods, so services
/// are generic over it rather than holding a trait object.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a read-write transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a read-only transaction.
    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// User repository for this transaction
    pub fn users(&self) -> TxUserRepository<'a> {
        TxUserRepository::new(self.txn)
    }

    /// Meeting repository for this transaction
    pub fn meetings(&self) -> TxMeetingRepository<'a> {
        TxMeetingRepository::new(self.txn)
    }

    /// Attendance (join table) repository for this transaction
    pub fn attendance(&self) -> TxAttendanceRepository<'a> {
        TxAttendanceRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Internal transaction execution with configurable access mode
    async fn execute_transaction<F, T>(&self, access: AccessMode, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // SQLite has no per-transaction isolation or access mode
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(access))
                    .await
            }
        }
        .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(AccessMode::ReadWrite, f).await
    }

    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(AccessMode::ReadOnly, f).await
    }
}

/// Run a block inside a read-write unit of work.
///
/// The block may only capture owned values besides the context.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

/// Run a block inside a read-only unit of work.
#[macro_export]
macro_rules! with_read_only {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.read_only(|$ctx| Box::pin(async move { $body })).await
    };
}
