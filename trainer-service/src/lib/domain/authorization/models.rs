use credentials::Role;
use credentials::TokenPayload;

/// Per-request identity derived from a validated token.
///
/// Created by the authentication gate, carried in the request extensions
/// and dropped with the request; concurrent requests never share one. The
/// user name is kept as the raw nickname claim; the authorization layer
/// re-validates it before talking to the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_name: String,
    pub role: Role,
    pub expires_at: i64,
}

impl From<TokenPayload> for Session {
    fn from(payload: TokenPayload) -> Self {
        Self {
            user_name: payload.user_name,
            role: payload.role,
            expires_at: payload.expires_at,
        }
    }
}

/// Outcome of a role check.
///
/// Tagged so a granted decision always carries both the user name and the
/// role; a decision with one but not the other cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Denied,
    Granted { user_name: String, role: Role },
}

impl AuthorizationDecision {
    pub fn granted(user_name: String, role: Role) -> Self {
        Self::Granted { user_name, role }
    }

    pub fn failed(&self) -> bool {
        matches!(self, Self::Denied)
    }
}
