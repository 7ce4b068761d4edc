//! Transaction-scoped user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::meeting::Entity as MeetingEntity;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{CreateUser, Meeting, User, UserDetails};
use crate::errors::{AppError, AppResult};

/// Transaction-aware user repository.
///
/// Executes all operations within the provided transaction.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(User::from))
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.txn)
            .await?;

        Ok(result.map(User::from))
    }

    /// Load the users with the given IDs, ordered by ID
    pub async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .order_by_asc(user::Column::Id)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    /// Create a new user.
    ///
    /// A concurrent insert of the same email surfaces as `Conflict`.
    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        let duplicate = input.duplicate_message();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_write(e, || duplicate))?;

        Ok(User::from(model))
    }

    /// Delete user by ID; `NotFound` when no row was removed
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User", id));
        }

        Ok(())
    }

    /// List every user together with the meetings they attend
    pub async fn list_with_meetings(&self) -> AppResult<Vec<UserDetails>> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .find_with_related(MeetingEntity)
            .all(self.txn)
            .await?;

        let mut users: Vec<UserDetails> = rows
            .into_iter()
            .map(|(user, meetings)| {
                let mut meetings: Vec<Meeting> = meetings.into_iter().map(Meeting::from).collect();
                meetings.sort_by_key(|m| m.id);
                UserDetails {
                    user: User::from(user),
                    meetings,
                }
            })
            .collect();
        users.sort_by_key(|details| details.user.id);

        Ok(users)
    }
}
