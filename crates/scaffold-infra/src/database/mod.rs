//! Database access: connection setup, SeaORM entities and repositories.

mod base_repo;
mod connections;
pub mod entity;
mod repos;

pub use base_repo::SeaOrmBaseRepository;
pub use connections::{DatabaseConfig, begin, commit, connect, ping};
pub use repos::{SeaOrmGroupRepository, SeaOrmUserRepository};
pub use sea_orm::{DatabaseConnection, DatabaseTransaction};

#[cfg(test)]
pub(crate) mod test_support;
