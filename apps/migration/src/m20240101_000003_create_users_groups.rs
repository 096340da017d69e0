//! Create `users_groups`, the many-to-many link between users and groups.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_users::Users;
use crate::m20240101_000002_create_groups::Groups;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UsersGroups::Table)
                    .if_not_exists()
                    .col(integer(UsersGroups::GroupId))
                    .col(integer(UsersGroups::UserId))
                    .primary_key(
                        Index::create()
                            .col(UsersGroups::GroupId)
                            .col(UsersGroups::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_groups_group")
                            .from(UsersGroups::Table, UsersGroups::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_groups_user")
                            .from(UsersGroups::Table, UsersGroups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_groups_user_id")
                    .table(UsersGroups::Table)
                    .col(UsersGroups::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UsersGroups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UsersGroups {
    Table,
    GroupId,
    UserId,
}
