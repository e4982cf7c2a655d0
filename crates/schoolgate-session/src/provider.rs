//! Identity provider backing the session accessor.
//!
//! [`AuthProvider`] is the seam between the session and wherever identity
//! actually lives. [`StoredAuthService`] keeps it in a [`SessionStore`]: a
//! signed token, a role marker, and one user record per role family.

use std::sync::Arc;

use schoolgate_auth::{Role, create_session_token, verify_session_token};
use schoolgate_config::JwtConfig;
use schoolgate_core::AppError;
use tracing::{debug, info, warn};

use crate::keys::SessionKeys;
use crate::store::SessionStore;
use crate::user::SessionUser;

pub trait AuthProvider: Send + Sync {
    /// Whether a valid, unexpired session is persisted.
    fn is_authenticated(&self) -> bool;

    /// The persisted user record for the persisted role.
    fn current_user(&self) -> Result<Option<SessionUser>, AppError>;

    /// The persisted role marker.
    fn user_role(&self) -> Result<Option<Role>, AppError>;

    /// Persist `user` under the slot belonging to `role`.
    fn store_user(&self, role: Role, user: &SessionUser) -> Result<(), AppError>;

    /// Open a new session for `user` acting as `role`.
    fn login(&self, role: Role, user: &SessionUser) -> Result<(), AppError>;

    /// Clear every persisted session value.
    fn logout(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct StoredAuthService {
    store: Arc<dyn SessionStore>,
    keys: SessionKeys,
    jwt_config: JwtConfig,
}

impl std::fmt::Debug for StoredAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredAuthService")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl StoredAuthService {
    pub fn new(store: Arc<dyn SessionStore>, keys: SessionKeys, jwt_config: JwtConfig) -> Self {
        Self {
            store,
            keys,
            jwt_config,
        }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        self.store.get(key).map_err(AppError::internal)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.store.set(key, value).map_err(AppError::internal)
    }

    fn token_role(&self) -> Result<Option<Role>, AppError> {
        let Some(token) = self.read(&self.keys.token())? else {
            return Ok(None);
        };
        let claims = verify_session_token(&token, &self.jwt_config)?;
        Ok(Some(claims.role))
    }
}

impl AuthProvider for StoredAuthService {
    fn is_authenticated(&self) -> bool {
        let token_role = match self.token_role() {
            Ok(Some(role)) => role,
            Ok(None) => return false,
            Err(e) => {
                debug!(error = %e, "Stored session token rejected");
                return false;
            }
        };

        match self.user_role() {
            Ok(Some(role)) if role == token_role => true,
            Ok(Some(role)) => {
                warn!(token_role = %token_role, stored_role = %role, "Session role marker does not match token");
                false
            }
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "Stored role marker unreadable");
                false
            }
        }
    }

    fn current_user(&self) -> Result<Option<SessionUser>, AppError> {
        let Some(role) = self.user_role()? else {
            return Ok(None);
        };

        self.read(&self.keys.user(role))?
            .map(|raw| SessionUser::from_json(&raw))
            .transpose()
    }

    fn user_role(&self) -> Result<Option<Role>, AppError> {
        self.read(&self.keys.role())?
            .map(|raw| {
                raw.parse::<Role>().map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Stored role marker invalid: {}", e))
                })
            })
            .transpose()
    }

    fn store_user(&self, role: Role, user: &SessionUser) -> Result<(), AppError> {
        user.ensure_valid()?;
        let json = serde_json::to_string(user)?;
        self.write(&self.keys.user(role), &json)?;
        debug!(user_id = %user.id, slot = role.storage_slot(), "User record persisted");
        Ok(())
    }

    fn login(&self, role: Role, user: &SessionUser) -> Result<(), AppError> {
        user.ensure_valid()?;
        let token = create_session_token(user.id, role, &self.jwt_config)?;

        self.store_user(role, user)?;
        self.write(&self.keys.role(), role.as_str())?;
        self.write(&self.keys.token(), &token)?;

        info!(user_id = %user.id, role = %role, "Session opened");
        Ok(())
    }

    fn logout(&self) -> Result<(), AppError> {
        let mut first_error = None;

        for key in self.keys.all() {
            if let Err(e) = self.store.remove(&key) {
                warn!(error = %e, key = %key, "Failed to clear session key");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(AppError::internal(e)),
            None => {
                info!("Session cleared");
                Ok(())
            }
        }
    }
}
