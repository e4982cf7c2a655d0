//! The closed set of identity roles.

use std::fmt;
use std::str::FromStr;

use schoolgate_core::ParseError;
use serde::{Deserialize, Serialize};

/// Coarse identity category driving default authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Principal,
    Student,
    Teacher,
    Coach,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Principal,
        Role::Student,
        Role::Teacher,
        Role::Coach,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Principal => "principal",
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Coach => "coach",
        }
    }

    /// Name of the storage slot holding this role's user record.
    ///
    /// Administrative roles share one slot; every other role has its own, so
    /// a teacher's record never lands where the admin's record lives.
    pub fn storage_slot(self) -> &'static str {
        match self {
            Role::SuperAdmin | Role::Admin | Role::Principal => "admin",
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Coach => "coach",
        }
    }

    /// Every distinct storage slot, in a stable order.
    pub fn storage_slots() -> [&'static str; 4] {
        ["admin", "student", "teacher", "coach"]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseError::new("role", s))
    }
}
