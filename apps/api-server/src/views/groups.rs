//! Group resource and its member collection.

use scaffold_core::domain::{Group, User};
use scaffold_core::error::{DomainError, FieldErrors};
use scaffold_core::pagination::{Page, PageRequest};
use scaffold_core::ports::{GroupRepository, UserRepository};
use scaffold_core::validation::GroupPayload;

pub const GROUP_NAME_TAKEN: &str = "Group name already exists";

/// Operations on `/api/groups`, bound to one request's session.
pub struct GroupApiView<'a, G, U>
where
    G: GroupRepository,
    U: UserRepository<Session = G::Session>,
{
    groups: &'a G,
    users: &'a U,
    session: &'a G::Session,
}

impl<'a, G, U> GroupApiView<'a, G, U>
where
    G: GroupRepository,
    U: UserRepository<Session = G::Session>,
{
    pub fn new(groups: &'a G, users: &'a U, session: &'a G::Session) -> Self {
        Self {
            groups,
            users,
            session,
        }
    }

    pub async fn get(&self, object_id: i32) -> Result<Group, DomainError> {
        self.groups
            .by_id(self.session, object_id)
            .await?
            .ok_or(DomainError::not_found("Group", object_id))
    }

    /// Groups ordered by name.
    pub async fn collection(&self, request: &PageRequest) -> Result<Page<Group>, DomainError> {
        Ok(self.groups.get_paginator(self.session, request).await?)
    }

    pub async fn post(&self, payload: GroupPayload) -> Result<Group, DomainError> {
        let group = payload.validate_create()?;
        if self
            .groups
            .by_group_name(self.session, &group.group_name)
            .await?
            .is_some()
        {
            return Err(FieldErrors::single("group_name", GROUP_NAME_TAKEN).into());
        }

        let group = self.groups.create(self.session, group).await?;
        tracing::info!(group_id = group.id, group_name = %group.group_name, "Group created");
        Ok(group)
    }

    /// Members of a group ordered by user id.
    pub async fn members(
        &self,
        object_id: i32,
        request: &PageRequest,
    ) -> Result<Page<User>, DomainError> {
        let group = self.get(object_id).await?;
        Ok(self
            .groups
            .get_user_paginator(self.session, &group, request)
            .await?)
    }

    /// Adding an existing member succeeds without a second row.
    pub async fn add_member(&self, object_id: i32, user_id: i32) -> Result<(), DomainError> {
        let group = self.get(object_id).await?;
        let user = self.user(user_id).await?;
        self.groups.add_member(self.session, &group, &user).await?;

        tracing::info!(group_id = group.id, user_id = user.id, "Member added");
        Ok(())
    }

    /// Removing a user who is not a member is a no-op.
    pub async fn remove_member(&self, object_id: i32, user_id: i32) -> Result<(), DomainError> {
        let group = self.get(object_id).await?;
        let user = self.user(user_id).await?;
        if self.groups.remove_member(self.session, &group, &user).await? {
            tracing::info!(group_id = group.id, user_id = user.id, "Member removed");
        }
        Ok(())
    }

    async fn user(&self, user_id: i32) -> Result<User, DomainError> {
        self.users
            .by_id(self.session, user_id)
            .await?
            .ok_or(DomainError::not_found("User", user_id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use scaffold_core::domain::NewUser;
    use scaffold_core::validation::MISSING;
    use scaffold_infra::database::begin;
    use scaffold_infra::{SeaOrmGroupRepository, SeaOrmUserRepository};

    use super::*;

    use crate::test_support::test_db;

    fn group(name: &str) -> GroupPayload {
        GroupPayload {
            group_name: Some(name.to_string()),
            ..GroupPayload::default()
        }
    }

    #[tokio::test]
    async fn test_group_pagination_covers_every_group_once() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let (groups, users) = (SeaOrmGroupRepository::new(), SeaOrmUserRepository::new());
        let view = GroupApiView::new(&groups, &users, &session);

        let names = ["kilo", "alpha", "juliet", "echo", "bravo", "india", "delta", "hotel"];
        for name in names {
            view.post(group(name)).await.unwrap();
        }

        let per_page = 3;
        let first = view
            .collection(&PageRequest::new(1).with_items_per_page(per_page))
            .await
            .unwrap();
        assert_eq!(first.item_count, names.len() as u64);

        let mut seen = Vec::new();
        for n in 1..=first.page_count {
            let page = view
                .collection(&PageRequest::new(n).with_items_per_page(per_page))
                .await
                .unwrap();
            assert!(page.len() as u64 <= per_page);
            let page_names: Vec<String> = page.items.into_iter().map(|g| g.group_name).collect();
            let mut sorted = page_names.clone();
            sorted.sort();
            assert_eq!(page_names, sorted);
            seen.extend(page_names);
        }

        assert_eq!(seen.len(), names.len());
        assert_eq!(seen.iter().collect::<HashSet<_>>().len(), names.len());
        assert_eq!(seen.first().map(String::as_str), Some("alpha"));
        assert_eq!(seen.last().map(String::as_str), Some("kilo"));
    }

    #[tokio::test]
    async fn test_post_validation() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let (groups, users) = (SeaOrmGroupRepository::new(), SeaOrmUserRepository::new());
        let view = GroupApiView::new(&groups, &users, &session);

        let err = view.post(GroupPayload::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e)
            if e.get("group_name") == Some(&[MISSING.to_string()][..])));

        view.post(group("admins")).await.unwrap();
        let err = view.post(group("admins")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e)
            if e.get("group_name") == Some(&[GROUP_NAME_TAKEN.to_string()][..])));
    }

    #[tokio::test]
    async fn test_get_missing_group() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let (groups, users) = (SeaOrmGroupRepository::new(), SeaOrmUserRepository::new());
        let view = GroupApiView::new(&groups, &users, &session);

        assert!(matches!(
            view.get(-1).await,
            Err(DomainError::NotFound { entity_type: "Group", .. })
        ));
        assert!(matches!(
            view.members(77, &PageRequest::default()).await,
            Err(DomainError::NotFound { entity_type: "Group", .. })
        ));
    }

    #[tokio::test]
    async fn test_membership() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let (groups, users) = (SeaOrmGroupRepository::new(), SeaOrmUserRepository::new());
        let view = GroupApiView::new(&groups, &users, &session);

        let admins = view.post(group("admins")).await.unwrap();
        let mut ids = Vec::new();
        for n in 0..3 {
            let user = users
                .create(&session, NewUser::new(format!("u{n}"), format!("u{n}@example.com")))
                .await
                .unwrap();
            ids.push(user.id);
        }

        view.add_member(admins.id, ids[2]).await.unwrap();
        view.add_member(admins.id, ids[0]).await.unwrap();
        view.add_member(admins.id, ids[0]).await.unwrap();

        let page = view.members(admins.id, &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.iter().map(|u| u.id).collect::<Vec<_>>(), vec![ids[0], ids[2]]);

        assert!(matches!(
            view.add_member(admins.id, 9999).await,
            Err(DomainError::NotFound { entity_type: "User", id: 9999 })
        ));

        view.remove_member(admins.id, ids[0]).await.unwrap();
        view.remove_member(admins.id, ids[0]).await.unwrap();
        let page = view.members(admins.id, &PageRequest::default()).await.unwrap();
        assert_eq!(page.item_count, 1);
    }
}
