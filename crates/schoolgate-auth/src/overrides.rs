//! Per-user permission overrides.
//!
//! Administrative user records may carry a `permissions` object that narrows
//! (or, under a deny-by-default policy, grants) individual actions:
//!
//! ```json
//! { "results": { "delete": false }, "library": { "edit": true } }
//! ```
//!
//! The map is typed end to end. Unknown resources, unknown actions, and
//! non-boolean values are rejected when the record is deserialized, so a
//! malformed record can never be half-applied.

use std::collections::BTreeMap;

use schoolgate_core::{Action, AppError, Resource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionOverrides(BTreeMap<Resource, BTreeMap<Action, bool>>);

impl PermissionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from their JSON representation.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| {
            AppError::bad_request(anyhow::anyhow!("Invalid permission overrides: {}", e))
        })
    }

    /// The explicit override for `(resource, action)`, if one is recorded.
    pub fn get(&self, resource: Resource, action: Action) -> Option<bool> {
        self.0
            .get(&resource)
            .and_then(|actions| actions.get(&action))
            .copied()
    }

    pub fn set(&mut self, resource: Resource, action: Action, allowed: bool) {
        self.0.entry(resource).or_default().insert(action, allowed);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, resource: Resource, action: Action, allowed: bool) -> Self {
        self.set(resource, action, allowed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }
}
