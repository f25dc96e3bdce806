use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::primitives::Role;

/// Claim set carried by every issued token.
///
/// `sub` and `aud` are fixed per deployment; `nickname` carries the user
/// name and `scope` the role. All claims are required on validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject, fixed by configuration
    pub sub: String,

    /// Audience, fixed by configuration
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Authenticated user name
    pub nickname: String,

    /// Role claim, `is:user` or `is:manager`
    pub scope: String,
}

/// Identity an authenticated use-case hands to the issuer.
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Decoded identity produced by successful validation; the material the
/// per-request session is populated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_name: String,
    pub role: Role,
    pub expires_at: i64,
}

/// Compact signed token: three dot-separated base64url segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWebToken(String);

impl JsonWebToken {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JsonWebToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
