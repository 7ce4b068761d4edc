//! Meeting service - Meetings and their attendance.
//!
//! Attendance changes are reported back as the meeting with its
//! current attendee list, read inside the same transaction as the write.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{parse_meeting_time, CreateMeeting, Meeting, MeetingDetails};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{ALREADY_ATTENDING, NOT_ATTENDING};
use crate::infra::{NewMeeting, TransactionContext, UnitOfWork};
use crate::{with_read_only, with_transaction};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Meeting service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MeetingService: Send + Sync {
    /// Get a meeting with its attendees
    async fn get_meeting(&self, id: i32) -> AppResult<MeetingDetails>;

    /// List every meeting with its attendees
    async fn list_meetings(&self) -> AppResult<Vec<MeetingDetails>>;

    /// Create a meeting; the title must not be in use
    async fn create_meeting(&self, input: CreateMeeting) -> AppResult<Meeting>;

    /// Add a user to a meeting's attendees
    async fn add_attendee(&self, user_id: i32, meeting_id: i32) -> AppResult<MeetingDetails>;

    /// Remove a user from a meeting's attendees
    async fn remove_attendee(&self, user_id: i32, meeting_id: i32) -> AppResult<MeetingDetails>;

    /// Delete a meeting and all of its attendance edges
    async fn remove_meeting(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of MeetingService using Unit of Work.
pub struct MeetingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MeetingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MeetingService for MeetingManager<U> {
    async fn get_meeting(&self, id: i32) -> AppResult<MeetingDetails> {
        with_read_only!(self.uow, |ctx| load_meeting(&ctx, id).await)
    }

    async fn list_meetings(&self) -> AppResult<Vec<MeetingDetails>> {
        with_read_only!(self.uow, |ctx| ctx.meetings().list_with_attendees().await)
    }

    async fn create_meeting(&self, input: CreateMeeting) -> AppResult<Meeting> {
        // Reject a malformed time before opening a transaction
        let time = parse_meeting_time(input.time.as_deref().unwrap_or_default())?;
        let duplicate = input.duplicate_message();
        let new = NewMeeting {
            title: input.title,
            time,
            content: input.content,
        };

        let meeting =
            with_transaction!(self.uow, |ctx| insert_meeting(&ctx, new, duplicate).await)?;
        tracing::info!(meeting_id = meeting.id, "Meeting created");
        Ok(meeting)
    }

    async fn add_attendee(&self, user_id: i32, meeting_id: i32) -> AppResult<MeetingDetails> {
        let meeting =
            with_transaction!(self.uow, |ctx| attend(&ctx, user_id, meeting_id).await)?;
        tracing::info!(user_id, meeting_id, "Attendee added");
        Ok(meeting)
    }

    async fn remove_attendee(&self, user_id: i32, meeting_id: i32) -> AppResult<MeetingDetails> {
        let meeting =
            with_transaction!(self.uow, |ctx| leave(&ctx, user_id, meeting_id).await)?;
        tracing::info!(user_id, meeting_id, "Attendee removed");
        Ok(meeting)
    }

    async fn remove_meeting(&self, id: i32) -> AppResult<()> {
        let detached = with_transaction!(self.uow, |ctx| delete_meeting(&ctx, id).await)?;
        tracing::info!(meeting_id = id, detached, "Meeting removed");
        Ok(())
    }
}

async fn load_meeting(ctx: &TransactionContext<'_>, id: i32) -> AppResult<MeetingDetails> {
    let meeting = ctx
        .meetings()
        .find_by_id(id)
        .await?
        .ok_or_not_found("Meeting", id)?;
    let user_ids = ctx.attendance().user_ids_for_meeting(id).await?;
    let attendees = ctx.users().find_many(user_ids).await?;

    Ok(MeetingDetails { meeting, attendees })
}

async fn insert_meeting(
    ctx: &TransactionContext<'_>,
    new: NewMeeting,
    duplicate: String,
) -> AppResult<Meeting> {
    if ctx.meetings().find_by_title(&new.title).await?.is_some() {
        return Err(AppError::conflict(duplicate));
    }

    ctx.meetings().create(new, duplicate).await
}

/// Both ends of an edge must exist before it is touched.
async fn ensure_pair(ctx: &TransactionContext<'_>, user_id: i32, meeting_id: i32) -> AppResult<()> {
    ctx.users()
        .find_by_id(user_id)
        .await?
        .ok_or_not_found("User", user_id)?;
    ctx.meetings()
        .find_by_id(meeting_id)
        .await?
        .ok_or_not_found("Meeting", meeting_id)?;
    Ok(())
}

async fn attend(
    ctx: &TransactionContext<'_>,
    user_id: i32,
    meeting_id: i32,
) -> AppResult<MeetingDetails> {
    ensure_pair(ctx, user_id, meeting_id).await?;

    if ctx.attendance().exists(user_id, meeting_id).await? {
        return Err(AppError::conflict(ALREADY_ATTENDING));
    }
    ctx.attendance().insert(user_id, meeting_id).await?;

    load_meeting(ctx, meeting_id).await
}

async fn leave(
    ctx: &TransactionContext<'_>,
    user_id: i32,
    meeting_id: i32,
) -> AppResult<MeetingDetails> {
    ensure_pair(ctx, user_id, meeting_id).await?;

    if !ctx.attendance().exists(user_id, meeting_id).await? {
        return Err(AppError::NotFound(NOT_ATTENDING.to_string()));
    }
    ctx.attendance().delete(user_id, meeting_id).await?;

    load_meeting(ctx, meeting_id).await
}

async fn delete_meeting(ctx: &TransactionContext<'_>, id: i32) -> AppResult<u64> {
    ctx.meetings()
        .find_by_id(id)
        .await?
        .ok_or_not_found("Meeting", id)?;

    let detached = ctx.attendance().delete_for_meeting(id).await?;
    ctx.meetings().delete(id).await?;

    Ok(detached)
}
