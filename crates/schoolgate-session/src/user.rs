//! The user record cached in the session.

use schoolgate_auth::PermissionOverrides;
use schoolgate_core::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// A signed-in user as held by the session.
///
/// Fields the gate does not interpret (department, phone, avatar, ...) are
/// kept verbatim in `profile` so a round trip through storage loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SessionUser {
    pub id: Uuid,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Name must be between 1 and 200 characters"
    ))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Per-user permission overrides; only consulted for admins and principals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionOverrides>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl SessionUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            permissions: None,
            profile: Map::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionOverrides) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Validate the record, turning field errors into a single bad-request error.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::bad_request(anyhow::anyhow!(format_errors(&e))))
    }

    /// Parse a stored record, rejecting malformed overrides and invalid fields.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let user: SessionUser = serde_json::from_str(json)
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Malformed user record: {}", e)))?;
        user.ensure_valid()?;
        Ok(user)
    }
}

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{} is invalid", field)))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
