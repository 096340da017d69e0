//! User resource: lookup, create, partial update, delete and listing.

use scaffold_core::domain::{NewUser, User};
use scaffold_core::error::{DomainError, FieldErrors};
use scaffold_core::pagination::{Page, PageRequest};
use scaffold_core::ports::{PasswordService, UserRepository};
use scaffold_core::validation::UserPayload;

pub const USER_NAME_TAKEN: &str = "User name already exists";
pub const EMAIL_TAKEN: &str = "Email already exists";

/// Operations on `/api/users/{object_id}`, bound to one request's session.
pub struct UserApiView<'a, R: UserRepository> {
    users: &'a R,
    session: &'a R::Session,
    passwords: &'a dyn PasswordService,
}

impl<'a, R: UserRepository> UserApiView<'a, R> {
    pub fn new(users: &'a R, session: &'a R::Session, passwords: &'a dyn PasswordService) -> Self {
        Self {
            users,
            session,
            passwords,
        }
    }

    pub async fn get(&self, object_id: i32) -> Result<User, DomainError> {
        self.users
            .by_id(self.session, object_id)
            .await?
            .ok_or(DomainError::not_found("User", object_id))
    }

    pub async fn post(&self, payload: UserPayload) -> Result<User, DomainError> {
        let data = payload.validate_create()?;
        self.check_unique(Some(&data.user_name), Some(&data.email), None)
            .await?;

        let password_hash = self
            .passwords
            .hash(&data.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let user = self
            .users
            .create(
                self.session,
                NewUser::new(data.user_name, data.email).with_password_hash(password_hash),
            )
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// The record must exist before the body is looked at.
    pub async fn patch(&self, object_id: i32, payload: UserPayload) -> Result<User, DomainError> {
        let mut user = self.get(object_id).await?;
        let changes = payload.validate_patch()?;
        self.check_unique(
            changes.user_name.as_deref(),
            changes.email.as_deref(),
            Some(user.id),
        )
        .await?;

        user.apply(changes);
        let user = self.users.save(self.session, user).await?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, object_id: i32) -> Result<(), DomainError> {
        let user = self.get(object_id).await?;
        self.users.delete(self.session, user.id).await?;

        tracing::info!(user_id = user.id, "User deleted");
        Ok(())
    }

    pub async fn collection(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        Ok(self.users.get_paginator(self.session, request).await?)
    }

    /// Report taken names as field errors; `owner` is the record being edited.
    async fn check_unique(
        &self,
        user_name: Option<&str>,
        email: Option<&str>,
        owner: Option<i32>,
    ) -> Result<(), DomainError> {
        let taken = |found: Option<User>| found.is_some_and(|u| Some(u.id) != owner);
        let mut errors = FieldErrors::new();

        if let Some(user_name) = user_name {
            if taken(self.users.by_user_name(self.session, user_name).await?) {
                errors.add("user_name", USER_NAME_TAKEN);
            }
        }
        if let Some(email) = email {
            if taken(self.users.by_email(self.session, email).await?) {
                errors.add("email", EMAIL_TAKEN);
            }
        }

        Ok(errors.into_result(())?)
    }
}

#[cfg(test)]
mod tests {
    use scaffold_core::validation::{MISSING, NO_DATA};
    use scaffold_infra::SeaOrmUserRepository;
    use scaffold_infra::database::begin;

    use super::*;
    use crate::test_support::{PlainPasswords, test_db};

    fn payload(user_name: Option<&str>, email: Option<&str>, password: Option<&str>) -> UserPayload {
        UserPayload {
            user_name: user_name.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
            ..UserPayload::default()
        }
    }

    fn new_user() -> UserPayload {
        payload(Some("new_user"), Some("foo@bar.baz"), Some("dupa"))
    }

    #[tokio::test]
    async fn test_post_valid_data() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let user = view.post(new_user()).await.unwrap();

        assert!(user.id > 0);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_name"], "new_user");
        assert_eq!(json["email"], "foo@bar.baz");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(user.password_hash.as_deref(), Some("plain$dupa"));
    }

    #[tokio::test]
    async fn test_post_no_data() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let err = view.post(UserPayload::default()).await.unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.get("user_name"), Some(&[MISSING.to_string()][..]));
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }

    #[tokio::test]
    async fn test_post_duplicate_names() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        view.post(new_user()).await.unwrap();
        let err = view.post(new_user()).await.unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.get("user_name"), Some(&[USER_NAME_TAKEN.to_string()][..]));
        assert_eq!(errors.get("email"), Some(&[EMAIL_TAKEN.to_string()][..]));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        for object_id in [-5, 0, 4242] {
            let err = view.get(object_id).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { entity_type: "User", id } if id == object_id));
        }
    }

    #[tokio::test]
    async fn test_get_existing() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let created = view.post(new_user()).await.unwrap();
        let found = view.get(created.id).await.unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.user_name, "new_user");
    }

    #[tokio::test]
    async fn test_patch_missing_checks_existence_first() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let invalid = payload(None, Some("not-an-email"), None);
        let err = view.patch(-5, invalid).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_patch_no_data_leaves_record_unchanged() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let created = view.post(new_user()).await.unwrap();
        let err = view.patch(created.id, UserPayload::default()).await.unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.get("_schema"), Some(&[NO_DATA.to_string()][..]));
        assert_eq!(view.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_patch_valid_data() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let created = view.post(new_user()).await.unwrap();
        let patched = view
            .patch(created.id, payload(None, Some("changed@example.com"), None))
            .await
            .unwrap();

        assert_eq!(patched.id, created.id);
        assert_eq!(patched.email, "changed@example.com");
        assert_eq!(patched.user_name, "new_user");
        assert_eq!(patched.password_hash, created.password_hash);

        let reread = view.get(created.id).await.unwrap();
        assert_eq!(reread.email, "changed@example.com");
    }

    #[tokio::test]
    async fn test_patch_may_keep_own_name() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let created = view.post(new_user()).await.unwrap();
        let other = view
            .post(payload(Some("other"), Some("other@bar.baz"), Some("secret")))
            .await
            .unwrap();

        let same = view
            .patch(created.id, payload(Some("new_user"), None, None))
            .await
            .unwrap();
        assert_eq!(same.user_name, "new_user");

        let err = view
            .patch(other.id, payload(Some("new_user"), None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e) if e.contains("user_name")));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let created = view.post(new_user()).await.unwrap();
        view.delete(created.id).await.unwrap();

        assert!(matches!(view.get(created.id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(view.delete(created.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_collection_is_id_ordered() {
        let db = test_db().await;
        let session = begin(&db).await.unwrap();
        let repo = SeaOrmUserRepository::new();
        let view = UserApiView::new(&repo, &session, &PlainPasswords);

        let mut ids = Vec::new();
        for n in 0..4 {
            let user = view
                .post(payload(
                    Some(&format!("user{n}")),
                    Some(&format!("user{n}@example.com")),
                    Some("secret"),
                ))
                .await
                .unwrap();
            ids.push(user.id);
        }

        let page = view
            .collection(&PageRequest::new(2).with_items_per_page(3))
            .await
            .unwrap();

        assert_eq!(page.item_count, 4);
        assert_eq!(page.items.iter().map(|u| u.id).collect::<Vec<_>>(), vec![ids[3]]);
        assert_eq!(page.previous_page, Some(1));
        assert_eq!(page.next_page, None);
    }
}
