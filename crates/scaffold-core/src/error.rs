//! Domain-level error types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Key used for errors that belong to the payload as a whole.
pub const SCHEMA_FIELD: &str = "_schema";

/// Field name -> messages collected while validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Build a set holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        Self::NotFound { entity_type, id }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Not a valid email address.");
        errors.add("email", "Longer than maximum length 100.");
        errors.add("user_name", "Missing data for required field.");

        assert_eq!(errors.get("email").map(<[String]>::len), Some(2));
        assert!(errors.contains("user_name"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn into_result_passes_value_through_when_empty() {
        assert_eq!(FieldErrors::new().into_result(7), Ok(7));
        assert!(FieldErrors::single("x", "bad").into_result(7).is_err());
    }

    #[test]
    fn merge_appends_messages() {
        let mut left = FieldErrors::single("email", "one");
        let mut right = FieldErrors::single("email", "two");
        right.add("user_name", "three");
        left.merge(right);

        assert_eq!(left.get("email"), Some(&["one".to_string(), "two".to_string()][..]));
        assert!(left.contains("user_name"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let errors = FieldErrors::single("password", "Missing data for required field.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"password": ["Missing data for required field."]}));
    }

    #[test]
    fn display_lists_every_message() {
        let mut errors = FieldErrors::new();
        errors.add("b", "second");
        errors.add("a", "first");
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
