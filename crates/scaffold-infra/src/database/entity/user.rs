//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub registered_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_group::Entity")]
    UsersGroups,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for scaffold_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            password_hash: model.password_hash,
            registered_date: model.registered_date.into(),
        }
    }
}

impl From<scaffold_core::domain::User> for ActiveModel {
    fn from(user: scaffold_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            user_name: Set(user.user_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            registered_date: Set(user.registered_date.into()),
        }
    }
}
