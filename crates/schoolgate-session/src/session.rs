//! The session accessor.
//!
//! A [`Session`] is created once per consumer and passed down explicitly.
//! Identity and role live together in [`SessionState`], so they are always
//! loaded, replaced, and cleared as one unit.

use std::sync::Arc;

use schoolgate_auth::{Policy, Role};
use schoolgate_config::SessionConfig;
use schoolgate_core::AppError;
use tracing::{info, warn};

use crate::permissions::Permissions;
use crate::provider::AuthProvider;
use crate::user::SessionUser;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated {
        user: SessionUser,
        role: Role,
    },
}

/// Where the consumer should navigate after a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

pub struct Session {
    provider: Arc<dyn AuthProvider>,
    state: SessionState,
    loading: bool,
    login_path: String,
    policy: Policy,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an accessor that has not read persisted state yet.
    ///
    /// [`loading`](Self::loading) stays `true` until the first
    /// [`check_auth`](Self::check_auth).
    pub fn new(provider: Arc<dyn AuthProvider>, config: &SessionConfig) -> Self {
        Self {
            provider,
            state: SessionState::Unauthenticated,
            loading: true,
            login_path: config.login_path.clone(),
            policy: Policy::new(config.admin_policy),
        }
    }

    /// Create an accessor and immediately load the persisted session.
    pub fn load(provider: Arc<dyn AuthProvider>, config: &SessionConfig) -> Self {
        let mut session = Self::new(provider, config);
        session.check_auth();
        session
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match &self.state {
            SessionState::Authenticated { role, .. } => Some(*role),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The permission gate for the current identity.
    ///
    /// The returned view borrows the session, so it cannot outlive a
    /// logout or a re-login.
    pub fn permissions(&self) -> Permissions<'_> {
        Permissions::new(self)
    }

    /// Re-read identity and role from the provider.
    ///
    /// Never fails: anything missing, expired, or corrupted leaves the
    /// session unauthenticated. Returns whether a session is active.
    pub fn check_auth(&mut self) -> bool {
        self.loading = true;
        self.state = self.read_persisted();
        self.loading = false;
        self.is_authenticated()
    }

    fn read_persisted(&self) -> SessionState {
        if !self.provider.is_authenticated() {
            return SessionState::Unauthenticated;
        }

        let role = match self.provider.user_role() {
            Ok(Some(role)) => role,
            Ok(None) => return SessionState::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted role; treating session as signed out");
                return SessionState::Unauthenticated;
            }
        };

        match self.provider.current_user() {
            Ok(Some(user)) => SessionState::Authenticated { user, role },
            Ok(None) => {
                warn!(role = %role, "No user record for persisted role; treating session as signed out");
                SessionState::Unauthenticated
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted user; treating session as signed out");
                SessionState::Unauthenticated
            }
        }
    }

    /// Open a session for `user` acting as `role`.
    ///
    /// The previous identity is dropped first, so a failed login leaves the
    /// session signed out.
    pub fn login(&mut self, role: Role, user: SessionUser) -> Result<(), AppError> {
        self.state = SessionState::Unauthenticated;
        self.provider.login(role, &user)?;
        self.state = SessionState::Authenticated { user, role };
        self.loading = false;
        Ok(())
    }

    /// Clear the persisted session and drop the cached identity.
    ///
    /// Storage failures are logged; the in-memory session is cleared
    /// regardless, so every later permission check is denied.
    pub fn logout(&mut self) -> Redirect {
        if let Err(e) = self.provider.logout() {
            warn!(error = %e, "Failed to clear persisted session");
        }

        if let SessionState::Authenticated { user, role } = &self.state {
            info!(user_id = %user.id, role = %role, "Signed out");
        }

        self.state = SessionState::Unauthenticated;
        self.loading = false;

        Redirect {
            location: self.login_path.clone(),
        }
    }

    /// Replace the cached user and persist it under the active role's slot.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` when no session is active
    /// - `BadRequest` when `new_user` fails validation
    /// - `Internal` when the store cannot be written
    ///
    /// The cached user is left untouched on any error.
    pub fn update_user(&mut self, new_user: SessionUser) -> Result<(), AppError> {
        let SessionState::Authenticated { user, role } = &mut self.state else {
            return Err(AppError::unauthorized("No active session".to_string()));
        };

        self.provider.store_user(*role, &new_user)?;
        *user = new_user;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use schoolgate_core::{Action, ErrorKind, Resource};

    /// Provider whose persisted state and failures are set directly.
    #[derive(Default)]
    struct ScriptedProvider {
        authenticated: bool,
        role: Option<Role>,
        user: Mutex<Option<SessionUser>>,
        fail_user_read: bool,
        fail_writes: bool,
        logouts: Mutex<usize>,
    }

    impl AuthProvider for ScriptedProvider {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn current_user(&self) -> Result<Option<SessionUser>, AppError> {
            if self.fail_user_read {
                return Err(AppError::bad_request(anyhow::anyhow!("corrupted record")));
            }
            Ok(self.user.lock().clone())
        }

        fn user_role(&self) -> Result<Option<Role>, AppError> {
            Ok(self.role)
        }

        fn store_user(&self, _role: Role, user: &SessionUser) -> Result<(), AppError> {
            if self.fail_writes {
                return Err(AppError::internal(anyhow::anyhow!("disk full")));
            }
            *self.user.lock() = Some(user.clone());
            Ok(())
        }

        fn login(&self, role: Role, user: &SessionUser) -> Result<(), AppError> {
            self.store_user(role, user)
        }

        fn logout(&self) -> Result<(), AppError> {
            *self.logouts.lock() += 1;
            if self.fail_writes {
                return Err(AppError::internal(anyhow::anyhow!("disk full")));
            }
            Ok(())
        }
    }

    fn signed_in(role: Role) -> ScriptedProvider {
        ScriptedProvider {
            authenticated: true,
            role: Some(role),
            user: Mutex::new(Some(SessionUser::new("Persisted"))),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_loading_until_checked() {
        let mut session = Session::new(Arc::new(signed_in(Role::Teacher)), &SessionConfig::default());
        assert!(session.loading());
        assert!(!session.is_authenticated());

        assert!(session.check_auth());
        assert!(!session.loading());
        assert_eq!(session.role(), Some(Role::Teacher));
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Persisted"));
    }

    #[test]
    fn test_corrupted_user_degrades_to_unauthenticated() {
        let provider = ScriptedProvider {
            fail_user_read: true,
            ..signed_in(Role::Admin)
        };
        let session = Session::load(Arc::new(provider), &SessionConfig::default());

        assert!(!session.loading());
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert_eq!(session.role(), None);
        assert!(!session.permissions().can_view(Resource::Profile));
    }

    #[test]
    fn test_missing_user_record_degrades_to_unauthenticated() {
        let provider = ScriptedProvider {
            user: Mutex::new(None),
            ..signed_in(Role::Student)
        };
        let session = Session::load(Arc::new(provider), &SessionConfig::default());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_even_when_store_fails() {
        let provider = Arc::new(ScriptedProvider {
            fail_writes: true,
            ..signed_in(Role::SuperAdmin)
        });
        let config = SessionConfig {
            login_path: "/portal/login".into(),
            ..SessionConfig::default()
        };
        let mut session = Session::load(provider.clone(), &config);
        assert!(session.permissions().can_delete(Resource::Results));

        let redirect = session.logout();
        assert_eq!(redirect.location, "/portal/login");
        assert!(!session.is_authenticated());
        assert!(!session.permissions().has_permission(Resource::Results, Action::View));
        assert_eq!(*provider.logouts.lock(), 1);
    }

    #[test]
    fn test_failed_login_drops_previous_identity() {
        let provider = Arc::new(signed_in(Role::Teacher));
        let mut session = Session::load(provider.clone(), &SessionConfig::default());
        assert_eq!(session.role(), Some(Role::Teacher));

        let failing = ScriptedProvider {
            fail_writes: true,
            ..signed_in(Role::Teacher)
        };
        session.provider = Arc::new(failing);

        let err = session
            .login(Role::Admin, SessionUser::new("Switching"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(!session.is_authenticated());
        assert!(!session.permissions().can_view(Resource::Results));
    }

    #[test]
    fn test_update_user_requires_session() {
        let mut session = Session::load(
            Arc::new(ScriptedProvider::default()),
            &SessionConfig::default(),
        );
        let err = session.update_user(SessionUser::new("Nobody")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_update_user_keeps_cache_on_store_failure() {
        let provider = ScriptedProvider {
            fail_writes: true,
            ..signed_in(Role::Teacher)
        };
        let mut session = Session::load(Arc::new(provider), &SessionConfig::default());

        let err = session.update_user(SessionUser::new("Renamed")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Persisted"));
    }
}
