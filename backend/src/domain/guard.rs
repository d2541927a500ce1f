//! Guard registry entities.
//!
//! A guard is identified externally by its guard code (for example
//! `GRD001`). Guards are write-once: there is no update path.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a guard code.
pub const GUARD_CODE_MAX: usize = 50;
/// Maximum length of a guard's display name.
pub const GUARD_NAME_MAX: usize = 255;

/// Validation errors for guard input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardValidationError {
    #[error("guard_id must not be empty")]
    EmptyCode,
    #[error("guard_id must be at most {max} characters")]
    CodeTooLong { max: usize },
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("guard_id must not contain NUL characters")]
    CodeContainsNul,
    #[error("name must not contain NUL characters")]
    NameContainsNul,
}

impl GuardValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyCode | Self::CodeTooLong { .. } | Self::CodeContainsNul => "guard_id",
            Self::EmptyName | Self::NameTooLong { .. } | Self::NameContainsNul => "name",
        }
    }
}

/// Storage-assigned guard identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardId(i32);

impl GuardId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GuardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External guard code, trimmed and non-empty.
///
/// Evaluations refer to guards by this code, not by [`GuardId`].
///
/// # Examples
/// ```
/// use kpi_backend::domain::GuardCode;
///
/// let code = GuardCode::new("  GRD001 ").unwrap();
/// assert_eq!(code.as_ref(), "GRD001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuardCode(String);

impl GuardCode {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GuardValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GuardValidationError::EmptyCode);
        }
        if trimmed.chars().count() > GUARD_CODE_MAX {
            return Err(GuardValidationError::CodeTooLong {
                max: GUARD_CODE_MAX,
            });
        }
        if trimmed.contains('\0') {
            return Err(GuardValidationError::CodeContainsNul);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for GuardCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GuardCode {
    type Error = GuardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GuardCode> for String {
    fn from(value: GuardCode) -> Self {
        value.0
    }
}

/// Human-readable guard name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuardName(String);

impl GuardName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GuardValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GuardValidationError::EmptyName);
        }
        if trimmed.chars().count() > GUARD_NAME_MAX {
            return Err(GuardValidationError::NameTooLong {
                max: GUARD_NAME_MAX,
            });
        }
        if trimmed.contains('\0') {
            return Err(GuardValidationError::NameContainsNul);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for GuardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GuardName {
    type Error = GuardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GuardName> for String {
    fn from(value: GuardName) -> Self {
        value.0
    }
}

/// Guard awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuard {
    pub code: GuardCode,
    pub name: GuardName,
}

impl NewGuard {
    /// Validate raw name and code. The code is checked first.
    pub fn try_from_parts(name: &str, code: &str) -> Result<Self, GuardValidationError> {
        let code = GuardCode::new(code)?;
        let name = GuardName::new(name)?;
        Ok(Self { code, name })
    }
}

/// A registered guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    pub id: GuardId,
    pub code: GuardCode,
    pub name: GuardName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
