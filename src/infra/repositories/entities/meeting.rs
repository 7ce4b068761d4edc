//! Meeting database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Meeting;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    /// Time of day; NULL when the meeting has no fixed time
    pub time: Option<Time>,
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::attendance::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::attendance::Relation::Meeting.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Meeting {
    fn from(model: Model) -> Self {
        Meeting {
            id: model.id,
            title: model.title,
            time: model.time,
            content: model.content,
        }
    }
}
