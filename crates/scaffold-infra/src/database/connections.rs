use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use scaffold_core::RepoError;

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every statement through sqlx.
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 100,
            min_connections: 10,
            sqlx_logging: true,
        }
    }
}

/// Open the connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, RepoError> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(config.sqlx_logging)
        .to_owned();

    let db = Database::connect(opts)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;

    tracing::info!(
        "Database connected (pool: {}..{})",
        config.min_connections,
        config.max_connections
    );
    Ok(db)
}

/// Start the unit of work for one request.
pub async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, RepoError> {
    db.begin()
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))
}

pub async fn commit(session: DatabaseTransaction) -> Result<(), RepoError> {
    session
        .commit()
        .await
        .map_err(|e| RepoError::Query(e.to_string()))
}

/// Round-trip to the database.
pub async fn ping(db: &DatabaseConnection) -> Result<(), RepoError> {
    db.ping()
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))
}
