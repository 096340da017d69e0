//! Application state - shared across all handlers.

use std::sync::Arc;

use scaffold_core::RepoError;
use scaffold_core::ports::PasswordService;
use scaffold_infra::database::{DatabaseConnection, DatabaseTransaction, connect};
use scaffold_infra::{Argon2PasswordService, SeaOrmGroupRepository, SeaOrmUserRepository};

use crate::config::AppConfig;
use crate::paging::PagingConfig;
use crate::views::{GroupApiView, UserApiView};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub users: Arc<SeaOrmUserRepository>,
    pub groups: Arc<SeaOrmGroupRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub paging: PagingConfig,
}

impl AppState {
    /// Connect the pool and wire the production implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let db = connect(&config.database).await?;
        let state = Self::with_connection(db, Arc::new(Argon2PasswordService::new()), config.paging);

        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub fn with_connection(
        db: DatabaseConnection,
        passwords: Arc<dyn PasswordService>,
        paging: PagingConfig,
    ) -> Self {
        Self {
            db,
            users: Arc::new(SeaOrmUserRepository::new()),
            groups: Arc::new(SeaOrmGroupRepository::new()),
            passwords,
            paging,
        }
    }

    pub fn user_view<'a>(
        &'a self,
        session: &'a DatabaseTransaction,
    ) -> UserApiView<'a, SeaOrmUserRepository> {
        UserApiView::new(self.users.as_ref(), session, self.passwords.as_ref())
    }

    pub fn group_view<'a>(
        &'a self,
        session: &'a DatabaseTransaction,
    ) -> GroupApiView<'a, SeaOrmGroupRepository, SeaOrmUserRepository> {
        GroupApiView::new(self.groups.as_ref(), self.users.as_ref(), session)
    }
}
