//! Transaction-scoped meeting repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::meeting::{self, ActiveModel, Entity as MeetingEntity};
use super::entities::user::Entity as UserEntity;
use crate::domain::{Meeting, MeetingDetails, User};
use crate::errors::{AppError, AppResult};

/// Fields of a meeting about to be inserted, time already parsed
#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub title: String,
    pub time: Option<chrono::NaiveTime>,
    pub content: String,
}

/// Transaction-aware meeting repository.
pub struct TxMeetingRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxMeetingRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find meeting by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Meeting>> {
        let result = MeetingEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(Meeting::from))
    }

    /// Find meeting by its unique title
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Meeting>> {
        let result = MeetingEntity::find()
            .filter(meeting::Column::Title.eq(title))
            .one(self.txn)
            .await?;

        Ok(result.map(Meeting::from))
    }

    /// Load the meetings with the given IDs, ordered by ID
    pub async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<Meeting>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = MeetingEntity::find()
            .filter(meeting::Column::Id.is_in(ids))
            .order_by_asc(meeting::Column::Id)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(Meeting::from).collect())
    }

    /// Create a new meeting.
    ///
    /// `duplicate` is the message reported if the title constraint rejects the insert.
    pub async fn create(&self, new: NewMeeting, duplicate: String) -> AppResult<Meeting> {
        let active_model = ActiveModel {
            id: NotSet,
            title: Set(new.title),
            time: Set(new.time),
            content: Set(new.content),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_write(e, || duplicate))?;

        Ok(Meeting::from(model))
    }

    /// Delete meeting by ID; `NotFound` when no row was removed
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = MeetingEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Meeting", id));
        }

        Ok(())
    }

    /// List every meeting together with its attendees
    pub async fn list_with_attendees(&self) -> AppResult<Vec<MeetingDetails>> {
        let rows = MeetingEntity::find()
            .order_by_asc(meeting::Column::Id)
            .find_with_related(UserEntity)
            .all(self.txn)
            .await?;

        let mut meetings: Vec<MeetingDetails> = rows
            .into_iter()
            .map(|(meeting, attendees)| {
                let mut attendees: Vec<User> = attendees.into_iter().map(User::from).collect();
                attendees.sort_by_key(|u| u.id);
                MeetingDetails {
                    meeting: Meeting::from(meeting),
                    attendees,
                }
            })
            .collect();
        meetings.sort_by_key(|details| details.meeting.id);

        Ok(meetings)
    }
}
