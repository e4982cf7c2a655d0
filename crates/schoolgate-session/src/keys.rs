//! Storage key layout for the persisted session.
//!
//! ```text
//! {prefix}:auth:token        signed session token
//! {prefix}:auth:role         role marker
//! {prefix}:user:{slot}       user record, one slot per role family
//! ```

use schoolgate_auth::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    prefix: String,
}

impl SessionKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn build(&self, parts: &[&str]) -> String {
        format!("{}:{}", self.prefix, parts.join(":"))
    }

    pub fn token(&self) -> String {
        self.build(&["auth", "token"])
    }

    pub fn role(&self) -> String {
        self.build(&["auth", "role"])
    }

    /// Key of the user record for `role`.
    pub fn user(&self, role: Role) -> String {
        self.build(&["user", role.storage_slot()])
    }

    /// Every user-record key, one per storage slot.
    pub fn user_slots(&self) -> Vec<String> {
        Role::storage_slots()
            .into_iter()
            .map(|slot| self.build(&["user", slot]))
            .collect()
    }

    /// Every key a session may write.
    pub fn all(&self) -> Vec<String> {
        let mut keys = vec![self.token(), self.role()];
        keys.extend(self.user_slots());
        keys
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::new("schoolgate")
    }
}
