use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "[redacted]";

/// Backend-assigned user identifier.
///
/// Backends disagree on whether ids are JSON strings or numbers; both are
/// accepted and kept in their textual form, which is also what goes into
/// `{base}/{id}` paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireUserId", into = "String")]
pub struct UserId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum WireUserId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireUserId> for UserId {
    fn from(value: WireUserId) -> Self {
        match value {
            WireUserId::Text(text) => Self(text),
            WireUserId::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// One user record as returned by `GET {base}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    /// Copies the editable fields into a form draft.
    #[must_use]
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// In-progress form values not yet submitted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserDraft {
    /// True when every field has at least one character.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }

    /// Builds the request body for a create, rejecting incomplete drafts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any field is empty.
    pub fn to_create_payload(&self) -> Result<UserPayload, AppError> {
        if self.is_complete() {
            Ok(self.to_payload())
        } else {
            Err(AppError::Validation(
                "All the input fields are necessary to fill.".to_string(),
            ))
        }
    }

    /// Builds the request body as-is.
    #[must_use]
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// JSON body of `POST {base}` and `PUT {base}/{id}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UserPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}
