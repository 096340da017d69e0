//! Input schemas for users and groups.
//!
//! Each payload is checked field by field and every failure is collected,
//! so a client sees all problems at once. Uniqueness needs the database and
//! is checked by the caller after the schema passes.

use serde_json::{Map, Value};

use crate::domain::{NewGroup, UserChanges};
use crate::error::{FieldErrors, SCHEMA_FIELD};

pub const USER_NAME_MAX: usize = 128;
pub const EMAIL_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 4;
pub const GROUP_NAME_MAX: usize = 128;

pub const MISSING: &str = "Missing data for required field.";
pub const NO_DATA: &str = "No data provided.";
pub const INVALID_EMAIL: &str = "Not a valid email address.";
pub const BLANK: &str = "Field may not be blank.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NULL: &str = "Field may not be null.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Raw user fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Fields that were sent with a value of the wrong type.
    pub rejected: FieldErrors,
}

/// Fields accepted for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl UserPayload {
    /// Read the known fields of a JSON body. Unknown keys are ignored.
    pub fn from_json(body: &Value) -> Self {
        let mut rejected = FieldErrors::new();
        let Some(object) = as_object(&mut rejected, body) else {
            return Self {
                rejected,
                ..Self::default()
            };
        };

        Self {
            user_name: string_field(&mut rejected, object, "user_name"),
            email: string_field(&mut rejected, object, "email"),
            password: string_field(&mut rejected, object, "password"),
            rejected,
        }
    }

    /// All of `user_name`, `email` and `password` are required.
    pub fn validate_create(self) -> Result<UserCreate, FieldErrors> {
        let mut errors = self.rejected;

        let user_name = required(&mut errors, "user_name", self.user_name)
            .and_then(|v| check(&mut errors, "user_name", trimmed(v), user_name_rules));
        let email = required(&mut errors, "email", self.email)
            .and_then(|v| check(&mut errors, "email", trimmed(v), email_rules));
        let password = required(&mut errors, "password", self.password)
            .and_then(|v| check(&mut errors, "password", v, password_rules));

        match (user_name, email, password) {
            (Some(user_name), Some(email), Some(password)) if errors.is_empty() => Ok(UserCreate {
                user_name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }

    /// Only `user_name` and `email` may change; at least one must be sent.
    pub fn validate_patch(self) -> Result<UserChanges, FieldErrors> {
        let mut errors = self.rejected;

        let user_name = self
            .user_name
            .and_then(|v| check(&mut errors, "user_name", trimmed(v), user_name_rules));
        let email = self
            .email
            .and_then(|v| check(&mut errors, "email", trimmed(v), email_rules));

        let changes = UserChanges { user_name, email };
        if changes.is_empty() && errors.is_empty() {
            errors.add(SCHEMA_FIELD, NO_DATA);
        }
        errors.into_result(changes)
    }
}

/// Raw group fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPayload {
    pub group_name: Option<String>,
    pub description: Option<String>,
    /// Fields that were sent with a value of the wrong type.
    pub rejected: FieldErrors,
}

impl GroupPayload {
    pub fn from_json(body: &Value) -> Self {
        let mut rejected = FieldErrors::new();
        let Some(object) = as_object(&mut rejected, body) else {
            return Self {
                rejected,
                ..Self::default()
            };
        };

        Self {
            group_name: string_field(&mut rejected, object, "group_name"),
            description: string_field(&mut rejected, object, "description"),
            rejected,
        }
    }

    pub fn validate_create(self) -> Result<NewGroup, FieldErrors> {
        let mut errors = self.rejected;

        let group_name = required(&mut errors, "group_name", self.group_name)
            .and_then(|v| check(&mut errors, "group_name", trimmed(v), group_name_rules));
        let description = self
            .description
            .map(trimmed)
            .filter(|d| !d.is_empty());

        match group_name {
            Some(group_name) if errors.is_empty() => Ok(NewGroup {
                group_name,
                description,
            }),
            _ => Err(errors),
        }
    }
}

fn as_object<'v>(rejected: &mut FieldErrors, body: &'v Value) -> Option<&'v Map<String, Value>> {
    let object = body.as_object();
    if object.is_none() {
        rejected.add(SCHEMA_FIELD, INVALID_INPUT);
    }
    object
}

/// An absent key is `None`; a present non-string value is recorded.
fn string_field(
    rejected: &mut FieldErrors,
    object: &Map<String, Value>,
    field: &str,
) -> Option<String> {
    match object.get(field)? {
        Value::String(value) => Some(value.clone()),
        Value::Null => {
            rejected.add(field, NULL);
            None
        }
        _ => {
            rejected.add(field, NOT_A_STRING);
            None
        }
    }
}

/// A field already rejected for its type is not also reported missing.
fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    if value.is_none() && !errors.contains(field) {
        errors.add(field, MISSING);
    }
    value
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn check(
    errors: &mut FieldErrors,
    field: &str,
    value: String,
    rules: fn(&str) -> Vec<String>,
) -> Option<String> {
    let failures = rules(&value);
    if failures.is_empty() {
        return Some(value);
    }
    for message in failures {
        errors.add(field, message);
    }
    None
}

fn user_name_rules(value: &str) -> Vec<String> {
    let mut failures = Vec::new();
    if value.is_empty() {
        failures.push(BLANK.to_string());
    }
    if value.chars().count() > USER_NAME_MAX {
        failures.push(too_long(USER_NAME_MAX));
    }
    failures
}

fn email_rules(value: &str) -> Vec<String> {
    let mut failures = Vec::new();
    if !is_email(value) {
        failures.push(INVALID_EMAIL.to_string());
    }
    if value.chars().count() > EMAIL_MAX {
        failures.push(too_long(EMAIL_MAX));
    }
    failures
}

fn password_rules(value: &str) -> Vec<String> {
    if value.chars().count() < PASSWORD_MIN {
        vec![format!("Shorter than minimum length {PASSWORD_MIN}.")]
    } else {
        Vec::new()
    }
}

fn group_name_rules(value: &str) -> Vec<String> {
    let mut failures = Vec::new();
    if value.is_empty() {
        failures.push(BLANK.to_string());
    }
    if value.chars().count() > GROUP_NAME_MAX {
        failures.push(too_long(GROUP_NAME_MAX));
    }
    failures
}

fn too_long(max: usize) -> String {
    format!("Longer than maximum length {max}.")
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
