//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/users` and `PATCH /api/users/{id}`.
///
/// Every field is optional on the wire; which ones are required depends on
/// the method and is decided by validation, not by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A user's public information. The credential is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub user_name: String,
    pub email: String,
}

/// Body of `POST /api/groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i32,
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 timestamp.
    pub created: String,
}

/// Body of `POST /api/groups/{id}/users`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub user_id: i32,
}

/// Query strings of the neighbouring pages, extra parameters included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// One page of a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub page: u64,
    pub items_per_page: u64,
    pub item_count: u64,
    pub page_count: u64,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    pub items: Vec<T>,
    pub links: PageLinks,
}
