//! # Scaffold Infrastructure
//!
//! Concrete implementations of the ports defined in `scaffold-core`:
//! SeaORM entities and repositories, connection setup, password hashing.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - Argon2 password hashing

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, SeaOrmGroupRepository, SeaOrmUserRepository};

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;
