use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use super::{DatabaseConfig, connect};

/// Fresh in-memory SQLite database with the full schema applied.
pub(crate) async fn test_db() -> DatabaseConnection {
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
