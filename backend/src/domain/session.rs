//! Session tokens issued after a successful login.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{UserId, UserRole, UserSummary};

/// How long an issued token stays valid.
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(24);

/// Identity asserted by a session token.
///
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user`, valid for [`SESSION_TTL`] from `issued_at`.
    pub fn for_user(user: &UserSummary, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: issued_at.timestamp(),
            exp: (issued_at + SESSION_TTL).timestamp(),
        }
    }
}

/// Encoded bearer token. The value is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub user: UserSummary,
}
