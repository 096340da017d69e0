use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use scaffold_core::ports::{AuthError, PasswordService};
use scaffold_infra::DatabaseConfig;
use scaffold_infra::database::{DatabaseConnection, connect};

use crate::paging::PagingConfig;
use crate::state::AppState;

/// Fresh in-memory SQLite database with the full schema applied.
pub async fn test_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        sqlx_logging: false,
    };
    let db = connect(&config).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("migrate up");
    db
}

pub async fn test_state() -> AppState {
    AppState::with_connection(test_db().await, Arc::new(PlainPasswords), PagingConfig::default())
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}
