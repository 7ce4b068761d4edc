//! Transaction-scoped access to the attendance join table.

use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};
use crate::errors::{AppError, AppResult};

/// Transaction-aware repository for (user, meeting) attendance edges.
pub struct TxAttendanceRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAttendanceRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Whether the user currently attends the meeting
    pub async fn exists(&self, user_id: i32, meeting_id: i32) -> AppResult<bool> {
        let edge = AttendanceEntity::find_by_id((user_id, meeting_id))
            .one(self.txn)
            .await?;

        Ok(edge.is_some())
    }

    /// Insert an edge; the composite key rejects duplicates as `Conflict`
    pub async fn insert(&self, user_id: i32, meeting_id: i32) -> AppResult<()> {
        let edge = ActiveModel {
            user_id: Set(user_id),
            meeting_id: Set(meeting_id),
        };

        AttendanceEntity::insert(edge)
            .exec_without_returning(self.txn)
            .await
            .map_err(|e| AppError::from_write(e, || ALREADY_ATTENDING.to_string()))?;

        Ok(())
    }

    /// Delete an edge; `NotFound` when the pair was not attending
    pub async fn delete(&self, user_id: i32, meeting_id: i32) -> AppResult<()> {
        let result = AttendanceEntity::delete_many()
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::MeetingId.eq(meeting_id))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(NOT_ATTENDING.to_string()));
        }

        Ok(())
    }

    /// IDs of the meetings a user attends
    pub async fn meeting_ids_for_user(&self, user_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = AttendanceEntity::find()
            .select_only()
            .column(attendance::Column::MeetingId)
            .filter(attendance::Column::UserId.eq(user_id))
            .order_by_asc(attendance::Column::MeetingId)
            .into_tuple()
            .all(self.txn)
            .await?;

        Ok(ids)
    }

    /// IDs of the users attending a meeting
    pub async fn user_ids_for_meeting(&self, meeting_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = AttendanceEntity::find()
            .select_only()
            .column(attendance::Column::UserId)
            .filter(attendance::Column::MeetingId.eq(meeting_id))
            .order_by_asc(attendance::Column::UserId)
            .into_tuple()
            .all(self.txn)
            .await?;

        Ok(ids)
    }

    /// Remove every edge of a user, returning how many were removed
    pub async fn delete_for_user(&self, user_id: i32) -> AppResult<u64> {
        let result = AttendanceEntity::delete_many()
            .filter(attendance::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Remove every edge of a meeting, returning how many were removed
    pub async fn delete_for_meeting(&self, meeting_id: i32) -> AppResult<u64> {
        let result = AttendanceEntity::delete_many()
            .filter(attendance::Column::MeetingId.eq(meeting_id))
            .exec(self.txn)
            .await?;

        Ok(result.rows_affected)
    }
}

pub(crate) const ALREADY_ATTENDING: &str = "User is already attendee";
pub(crate) const NOT_ATTENDING: &str = "User is not an attendee";
