//! Query and mutation roots.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema};

use super::types::{Meeting, User};
use crate::config::MAX_QUERY_DEPTH;
use crate::domain::{CreateMeeting, CreateUser};
use crate::services::ServiceContainer;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the service container available to every resolver.
pub fn build_schema(services: Arc<dyn ServiceContainer>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}

/// SDL of the schema; resolvers never run, so no services are attached.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn services<'c>(ctx: &Context<'c>) -> Result<&'c Arc<dyn ServiceContainer>> {
    ctx.data::<Arc<dyn ServiceContainer>>()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch a user and the meetings they attend
    async fn get_user(&self, ctx: &Context<'_>, id: i32) -> Result<User> {
        let user = services(ctx)?
            .users()
            .get_user(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }

    /// Fetch a meeting and its attendees
    async fn get_meeting(&self, ctx: &Context<'_>, id: i32) -> Result<Meeting> {
        let meeting = services(ctx)?
            .meetings()
            .get_meeting(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(meeting.into())
    }

    async fn get_all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let users = services(ctx)?
            .users()
            .list_users()
            .await
            .map_err(|e| e.extend())?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_all_meetings(&self, ctx: &Context<'_>) -> Result<Vec<Meeting>> {
        let meetings = services(ctx)?
            .meetings()
            .list_meetings()
            .await
            .map_err(|e| e.extend())?;
        Ok(meetings.into_iter().map(Meeting::from).collect())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, name: String, email: String) -> Result<User> {
        let user = services(ctx)?
            .users()
            .create_user(CreateUser { name, email })
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }

    /// `time` is `HH:MM`; empty or omitted leaves the meeting unscheduled
    async fn create_meeting(
        &self,
        ctx: &Context<'_>,
        title: String,
        time: Option<String>,
        content: String,
    ) -> Result<Meeting> {
        let meeting = services(ctx)?
            .meetings()
            .create_meeting(CreateMeeting {
                title,
                time,
                content,
            })
            .await
            .map_err(|e| e.extend())?;
        Ok(meeting.into())
    }

    async fn add_user_to_meeting(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
        meeting_id: i32,
    ) -> Result<Meeting> {
        let meeting = services(ctx)?
            .meetings()
            .add_attendee(user_id, meeting_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(meeting.into())
    }

    async fn remove_user_from_meeting(
        &self,
        ctx: &Context<'_>,
        user_id: i32,
        meeting_id: i32,
    ) -> Result<Meeting> {
        let meeting = services(ctx)?
            .meetings()
            .remove_attendee(user_id, meeting_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(meeting.into())
    }

    async fn remove_user(&self, ctx: &Context<'_>, user_id: i32) -> Result<String> {
        services(ctx)?
            .users()
            .remove_user(user_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(format!("User with id={} was successfully deleted", user_id))
    }

    async fn remove_meeting(&self, ctx: &Context<'_>, meeting_id: i32) -> Result<String> {
        services(ctx)?
            .meetings()
            .remove_meeting(meeting_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(format!("Meeting with id={} was successfully deleted", meeting_id))
    }
}
