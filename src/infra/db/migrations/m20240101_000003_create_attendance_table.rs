//! Migration: Create the meeting/user attendance join table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_meetings_table::Meetings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeetingUserAssociation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetingUserAssociation::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeetingUserAssociation::MeetingId)
                            .integer()
                            .not_null(),
                    )
                    // A pair may exist at most once
                    .primary_key(
                        Index::create()
                            .name("pk_meeting_user_association")
                            .col(MeetingUserAssociation::UserId)
                            .col(MeetingUserAssociation::MeetingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_user")
                            .from(MeetingUserAssociation::Table, MeetingUserAssociation::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_meeting")
                            .from(MeetingUserAssociation::Table, MeetingUserAssociation::MeetingId)
                            .to(Meetings::Table, Meetings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Speeds up "attendees of meeting" lookups; user-side lookups use the PK prefix
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_meeting_id")
                    .table(MeetingUserAssociation::Table)
                    .col(MeetingUserAssociation::MeetingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_attendance_meeting_id")
                    .table(MeetingUserAssociation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MeetingUserAssociation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MeetingUserAssociation {
    Table,
    UserId,
    MeetingId,
}
