use chrono::{DateTime, Utc};
use serde::Serialize;

/// User entity - represents a registered account.
///
/// The credential is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub registered_date: DateTime<Utc>,
}

impl User {
    /// Apply a validated partial update. Absent fields stay untouched.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(user_name) = changes.user_name {
            self.user_name = user_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
    }
}

/// A user that has not been stored yet; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password_hash: None,
        }
    }

    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }
}

/// Validated subset of user fields for a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub user_name: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: 3,
            user_name: "bar".to_string(),
            email: "foo@example.com".to_string(),
            password_hash: Some("$argon2id$secret".to_string()),
            registered_date: Utc::now(),
        }
    }

    #[test]
    fn serialized_form_omits_credential() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["user_name"], "bar");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn apply_touches_only_provided_fields() {
        let mut user = sample();
        user.apply(UserChanges {
            user_name: Some("changed".to_string()),
            email: None,
        });

        assert_eq!(user.user_name, "changed");
        assert_eq!(user.email, "foo@example.com");
        assert_eq!(user.password_hash.as_deref(), Some("$argon2id$secret"));
    }
}
