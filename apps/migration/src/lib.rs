//! Schema migrations for users, groups and their membership table.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_groups;
mod m20240101_000003_create_users_groups;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_groups::Migration),
            // Membership references both tables above
            Box::new(m20240101_000003_create_users_groups::Migration),
        ]
    }
}
