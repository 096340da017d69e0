//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Related, Set,
};

use scaffold_core::RepoError;
use scaffold_core::domain::{Group, NewGroup, NewUser, User};
use scaffold_core::pagination::{Page, PageRequest};
use scaffold_core::ports::{GroupRepository, UserRepository};

use super::base_repo::{SeaOrmBaseRepository, map_db_err, paginate};
use super::entity::group::{self, Entity as GroupEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::user_group::{self, Entity as UserGroupEntity};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmBaseRepository<UserEntity>;

/// SeaORM group repository.
pub type SeaOrmGroupRepository = SeaOrmBaseRepository<GroupEntity>;

/// Keep only the first character of the local part, for logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, session: &DatabaseTransaction, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: NotSet,
            user_name: Set(user.user_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            registered_date: Set(Utc::now().into()),
        }
        .insert(session)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User created");
        Ok(model.into())
    }

    async fn by_user_name(
        &self,
        session: &DatabaseTransaction,
        user_name: &str,
    ) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(session)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn by_email(
        &self,
        session: &DatabaseTransaction,
        email: &str,
    ) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(session)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn get_paginator(
        &self,
        session: &DatabaseTransaction,
        request: &PageRequest,
    ) -> Result<Page<User>, RepoError> {
        let query = UserEntity::find().order_by_asc(user::Column::Id);
        let page = paginate(session, query, request).await?;

        Ok(page.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn create(
        &self,
        session: &DatabaseTransaction,
        group: NewGroup,
    ) -> Result<Group, RepoError> {
        let model = group::ActiveModel {
            id: NotSet,
            group_name: Set(group.group_name),
            description: Set(group.description),
            created: Set(Utc::now().into()),
        }
        .insert(session)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(group_id = model.id, group_name = %model.group_name, "Group created");
        Ok(model.into())
    }

    async fn by_group_name(
        &self,
        session: &DatabaseTransaction,
        group_name: &str,
    ) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::GroupName.eq(group_name))
            .one(session)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn get_paginator(
        &self,
        session: &DatabaseTransaction,
        request: &PageRequest,
    ) -> Result<Page<Group>, RepoError> {
        let query = GroupEntity::find().order_by_asc(group::Column::GroupName);
        let page = paginate(session, query, request).await?;

        Ok(page.map(Into::into))
    }

    async fn get_user_paginator(
        &self,
        session: &DatabaseTransaction,
        group: &Group,
        request: &PageRequest,
    ) -> Result<Page<User>, RepoError> {
        let query = <GroupEntity as Related<UserEntity>>::find_related()
            .filter(group::Column::Id.eq(group.id))
            .order_by_asc(user::Column::Id);
        let page = paginate(session, query, request).await?;

        Ok(page.map(Into::into))
    }

    async fn add_member(
        &self,
        session: &DatabaseTransaction,
        group: &Group,
        user: &User,
    ) -> Result<(), RepoError> {
        let existing = UserGroupEntity::find_by_id((group.id, user.id))
            .one(session)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            return Ok(());
        }

        let link = user_group::ActiveModel {
            group_id: Set(group.id),
            user_id: Set(user.id),
        };
        UserGroupEntity::insert(link)
            .exec_without_returning(session)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(group_id = group.id, user_id = user.id, "Member added");
        Ok(())
    }

    async fn remove_member(
        &self,
        session: &DatabaseTransaction,
        group: &Group,
        user: &User,
    ) -> Result<bool, RepoError> {
        let result = UserGroupEntity::delete_by_id((group.id, user.id))
            .exec(session)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("foo@bar.baz"), "f***@bar.baz");
        assert_eq!(mask_email("f@bar.baz"), "***@bar.baz");
        assert_eq!(mask_email("ü-user@bar.baz"), "ü***@bar.baz");
        assert_eq!(mask_email("nope"), "***");
    }
}
