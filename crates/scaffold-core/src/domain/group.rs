use chrono::{DateTime, Utc};
use serde::Serialize;

/// Group entity. Members are reached through the group repository, never
/// loaded onto the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i32,
    pub group_name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
}

/// A group that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub group_name: String,
    pub description: Option<String>,
}

impl NewGroup {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
