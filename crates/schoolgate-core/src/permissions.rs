//! Resources and actions subject to access control.
//!
//! A permission is always the pair `(Resource, Action)`. Both enums use
//! snake_case wire names so they can key the per-user override maps stored
//! alongside the session.
//!
//! # Example
//!
//! ```
//! use schoolgate_core::permissions::{Action, Resource};
//!
//! let resource: Resource = "attendance".parse().unwrap();
//! assert_eq!(resource, Resource::Attendance);
//! assert_eq!(Action::Edit.as_str(), "edit");
//! assert!("gradebook".parse::<Resource>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a resource, action, or role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A domain object category guarded by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Attendance,
    Complaints,
    Courses,
    Library,
    Notices,
    Participants,
    Profile,
    Results,
    Sports,
    Students,
    Teachers,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::Attendance,
        Resource::Complaints,
        Resource::Courses,
        Resource::Library,
        Resource::Notices,
        Resource::Participants,
        Resource::Profile,
        Resource::Results,
        Resource::Sports,
        Resource::Students,
        Resource::Teachers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Attendance => "attendance",
            Resource::Complaints => "complaints",
            Resource::Courses => "courses",
            Resource::Library => "library",
            Resource::Notices => "notices",
            Resource::Participants => "participants",
            Resource::Profile => "profile",
            Resource::Results => "results",
            Resource::Sports => "sports",
            Resource::Students => "students",
            Resource::Teachers => "teachers",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseError::new("resource", s))
    }
}

/// An operation performed against a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseError::new("action", s))
    }
}
