//! Session storage and authorization policy configuration.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How admins and principals are treated when their user record carries no
/// override for a `(resource, action)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminPolicy {
    /// Allowed unless an override explicitly denies.
    #[default]
    AllowByDefault,
    /// Denied unless an override explicitly allows.
    DenyByDefault,
}

impl FromStr for AdminPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(AdminPolicy::AllowByDefault),
            "deny" => Ok(AdminPolicy::DenyByDefault),
            other => Err(format!("invalid admin policy: {other} (expected allow or deny)")),
        }
    }
}

impl fmt::Display for AdminPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminPolicy::AllowByDefault => f.write_str("allow"),
            AdminPolicy::DenyByDefault => f.write_str("deny"),
        }
    }
}

/// Session configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SCHOOLGATE_SESSION_FILE`: file backing the persisted session (default: `.schoolgate/session.json`)
/// - `SCHOOLGATE_KEY_PREFIX`: prefix for every storage key (default: `schoolgate`)
/// - `SCHOOLGATE_LOGIN_PATH`: where logout redirects to (default: `/login`)
/// - `SCHOOLGATE_ADMIN_POLICY`: `allow` or `deny` (default: `allow`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub session_file: PathBuf,
    pub key_prefix: String,
    pub login_path: String,
    pub admin_policy: AdminPolicy,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            session_file: lookup("SCHOOLGATE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            key_prefix: lookup("SCHOOLGATE_KEY_PREFIX")
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.key_prefix),
            login_path: lookup("SCHOOLGATE_LOGIN_PATH").unwrap_or(defaults.login_path),
            admin_policy: lookup("SCHOOLGATE_ADMIN_POLICY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.admin_policy),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from(".schoolgate/session.json"),
            key_prefix: "schoolgate".into(),
            login_path: "/login".into(),
            admin_policy: AdminPolicy::AllowByDefault,
        }
    }
}
