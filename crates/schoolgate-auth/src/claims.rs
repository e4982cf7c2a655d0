//! Session token claims.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Claims embedded in a session token.
///
/// The role travels inside the signed token so a tampered role marker in the
/// session store can be detected when the session is re-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role the session was opened with
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
