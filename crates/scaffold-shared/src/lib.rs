//! # Scaffold Shared
//!
//! Request/response types of the HTTP API, free of server dependencies so
//! clients can reuse them.

pub mod dto;
pub mod response;

pub use dto::{PageLinks, PageResponse};
pub use response::ErrorResponse;
