//! User accounts.
//!
//! Accounts are created out-of-band (see the `create-user` binary) and only
//! read by the credential verifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the optional login id column.
pub const LOGIN_ID_MAX: usize = 50;
/// Maximum length of the name and email columns.
pub const USER_TEXT_MAX: usize = 255;

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role granted to an account. Stored and serialised in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    #[default]
    Admin,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or supplied role is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`; expected `user` or `admin`")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A stored account, including its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login_id: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public projection safe to return to clients.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Account fields that may be shown to the account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Validation failures for [`NewUser`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain `@`")]
    MalformedEmail,
    #[error("name must not be empty")]
    EmptyName,
    #[error("login id must not be empty when supplied")]
    EmptyLoginId,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Account to be inserted, with its password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    login_id: Option<String>,
    name: String,
    email: String,
    password_hash: String,
    role: UserRole,
}

impl NewUser {
    pub fn try_new(
        login_id: Option<&str>,
        name: &str,
        email: &str,
        password_hash: String,
        role: UserRole,
    ) -> Result<Self, UserValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email.contains('@') {
            return Err(UserValidationError::MalformedEmail);
        }
        check_len("email", email, USER_TEXT_MAX)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        check_len("name", name, USER_TEXT_MAX)?;

        let login_id = match login_id.map(str::trim) {
            None => None,
            Some("") => return Err(UserValidationError::EmptyLoginId),
            Some(value) => {
                check_len("login id", value, LOGIN_ID_MAX)?;
                Some(value.to_owned())
            }
        };

        Ok(Self {
            login_id,
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash,
            role,
        })
    }

    pub fn login_id(&self) -> Option<&str> {
        self.login_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), UserValidationError> {
    if value.chars().count() > max {
        return Err(UserValidationError::TooLong { field, max });
    }
    Ok(())
}
