use async_trait::async_trait;

use crate::domain::{Group, NewGroup, NewUser, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
///
/// Every operation runs inside a caller-owned session (one per request);
/// implementations never open or look up a session on their own.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Unit of work the operations run in.
    type Session: Send + Sync;

    /// Find an entity by its primary key.
    async fn by_id(&self, session: &Self::Session, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (update when the key exists, insert otherwise).
    async fn save(&self, session: &Self::Session, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, session: &Self::Session, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a new user and return it with its assigned id.
    async fn create(&self, session: &Self::Session, user: NewUser) -> Result<User, RepoError>;

    async fn by_user_name(
        &self,
        session: &Self::Session,
        user_name: &str,
    ) -> Result<Option<User>, RepoError>;

    async fn by_email(&self, session: &Self::Session, email: &str)
    -> Result<Option<User>, RepoError>;

    /// All users ordered by id.
    async fn get_paginator(
        &self,
        session: &Self::Session,
        request: &PageRequest,
    ) -> Result<Page<User>, RepoError>;
}

/// Group repository: lookups, paginated listings and membership.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, i32> {
    async fn create(&self, session: &Self::Session, group: NewGroup) -> Result<Group, RepoError>;

    async fn by_group_name(
        &self,
        session: &Self::Session,
        group_name: &str,
    ) -> Result<Option<Group>, RepoError>;

    /// All groups ordered by name.
    async fn get_paginator(
        &self,
        session: &Self::Session,
        request: &PageRequest,
    ) -> Result<Page<Group>, RepoError>;

    /// Members of `group` ordered by user id.
    async fn get_user_paginator(
        &self,
        session: &Self::Session,
        group: &Group,
        request: &PageRequest,
    ) -> Result<Page<User>, RepoError>;

    /// Add `user` to `group`; adding an existing member is a no-op.
    async fn add_member(
        &self,
        session: &Self::Session,
        group: &Group,
        user: &User,
    ) -> Result<(), RepoError>;

    /// Remove `user` from `group`. Returns whether a membership existed.
    async fn remove_member(
        &self,
        session: &Self::Session,
        group: &Group,
        user: &User,
    ) -> Result<bool, RepoError>;
}
