//! User service - Handles user-related use cases.
//!
//! Each method runs in its own unit of work.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateUser, User, UserDetails};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::{with_read_only, with_transaction};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user with the meetings they attend
    async fn get_user(&self, id: i32) -> AppResult<UserDetails>;

    /// List every user with the meetings they attend
    async fn list_users(&self) -> AppResult<Vec<UserDetails>>;

    /// Create a user; the email must not be in use
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Delete a user and all of their attendance edges
    async fn remove_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<UserDetails> {
        with_read_only!(self.uow, |ctx| load_user(&ctx, id).await)
    }

    async fn list_users(&self) -> AppResult<Vec<UserDetails>> {
        with_read_only!(self.uow, |ctx| ctx.users().list_with_meetings().await)
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let user = with_transaction!(self.uow, |ctx| insert_user(&ctx, input).await)?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn remove_user(&self, id: i32) -> AppResult<()> {
        let detached = with_transaction!(self.uow, |ctx| delete_user(&ctx, id).await)?;
        tracing::info!(user_id = id, detached, "User removed");
        Ok(())
    }
}

async fn load_user(ctx: &TransactionContext<'_>, id: i32) -> AppResult<UserDetails> {
    let user = ctx.users().find_by_id(id).await?.ok_or_not_found("User", id)?;
    let meeting_ids = ctx.attendance().meeting_ids_for_user(id).await?;
    let meetings = ctx.meetings().find_many(meeting_ids).await?;

    Ok(UserDetails { user, meetings })
}

async fn insert_user(ctx: &TransactionContext<'_>, input: CreateUser) -> AppResult<User> {
    if ctx.users().find_by_email(&input.email).await?.is_some() {
        return Err(AppError::conflict(input.duplicate_message()));
    }

    ctx.users().create(input).await
}

/// Returns how many attendance edges were removed along with the user.
async fn delete_user(ctx: &TransactionContext<'_>, id: i32) -> AppResult<u64> {
    ctx.users().find_by_id(id).await?.ok_or_not_found("User", id)?;

    let detached = ctx.attendance().delete_for_user(id).await?;
    ctx.users().delete(id).await?;

    Ok(detached)
}
