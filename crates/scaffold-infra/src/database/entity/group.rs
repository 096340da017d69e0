//! Group entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub group_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_group::Entity")]
    UsersGroups,
}

impl Related<super::user_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UsersGroups.def()
    }
}

/// Members of a group, through `users_groups`.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_group::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_group::Relation::Group.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for scaffold_core::domain::Group {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            group_name: model.group_name,
            description: model.description,
            created: model.created.into(),
        }
    }
}

impl From<scaffold_core::domain::Group> for ActiveModel {
    fn from(group: scaffold_core::domain::Group) -> Self {
        Self {
            id: Set(group.id),
            group_name: Set(group.group_name),
            description: Set(group.description),
            created: Set(group.created.into()),
        }
    }
}
