//! Login credentials accepted by the credential verifier.
//!
//! Handlers build [`LoginCredentials`] from the raw payload before calling the
//! [`LoginService`](crate::domain::ports::LoginService) port, so blank input
//! never reaches persistence.

use std::fmt;

use zeroize::Zeroizing;

/// Returned when a login payload is missing a required value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Neither an email nor a login id was supplied.
    MissingIdentifier,
    /// Password was blank.
    MissingPassword,
    /// Identifier contained a NUL character.
    InvalidIdentifier,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifier => write!(f, "email or login id must not be empty"),
            Self::MissingPassword => write!(f, "password must not be empty"),
            Self::InvalidIdentifier => write!(f, "email or login id must not contain NUL"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login identifier and password.
///
/// The identifier is matched case-insensitively against both the email and
/// the login id of stored accounts.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, including whitespace.
///
/// # Examples
/// ```
/// use kpi_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" GRD001 ", "secret").unwrap();
/// assert_eq!(creds.identifier(), "GRD001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(LoginValidationError::MissingIdentifier);
        }
        if identifier.contains('\0') {
            return Err(LoginValidationError::InvalidIdentifier);
        }
        if password.is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }
        Ok(Self {
            identifier: identifier.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email or login id as typed by the caller, trimmed.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw", LoginValidationError::MissingIdentifier)]
    #[case("   ", "pw", LoginValidationError::MissingIdentifier)]
    #[case("ops@example.com", "", LoginValidationError::MissingPassword)]
    #[case("ops\u{0}@example.com", "pw", LoginValidationError::InvalidIdentifier)]
    fn rejects_blank_parts(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("blank input must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  GRD001 ", " spaced pw ")]
    #[case("ops@example.com", "secret")]
    fn trims_identifier_but_not_password(#[case] identifier: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(identifier, password).expect("valid input");
        assert_eq!(creds.identifier(), identifier.trim());
        assert_eq!(creds.password(), password);
    }
}
