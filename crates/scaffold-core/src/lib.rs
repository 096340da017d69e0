//! # Scaffold Core
//!
//! The domain layer of the scaffold.
//! Entities, pagination, input validation and the repository ports that
//! infrastructure implements. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod validation;

pub use error::{DomainError, FieldErrors, RepoError};
pub use pagination::{Page, PageRequest};
