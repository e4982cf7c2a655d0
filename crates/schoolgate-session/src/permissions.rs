//! Permission gate bound to a live [`Session`].

use schoolgate_auth::Role;
use schoolgate_core::{Action, AppError, Resource};

use crate::session::Session;

/// Read-only view answering "may the current identity do this?".
///
/// Every call re-reads role and overrides from the session; nothing is
/// memoized.
#[derive(Debug, Clone, Copy)]
pub struct Permissions<'a> {
    session: &'a Session,
}

impl<'a> Permissions<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn has_permission(&self, resource: Resource, action: Action) -> bool {
        let overrides = self.session.user().and_then(|u| u.permissions.as_ref());
        self.session
            .policy()
            .allows(self.session.role(), overrides, resource, action)
    }

    /// String-keyed form of [`has_permission`](Self::has_permission).
    /// Unknown resource or action names are denied.
    pub fn check(&self, resource: &str, action: &str) -> bool {
        match (resource.parse::<Resource>(), action.parse::<Action>()) {
            (Ok(resource), Ok(action)) => self.has_permission(resource, action),
            _ => false,
        }
    }

    pub fn can_view(&self, resource: Resource) -> bool {
        self.has_permission(resource, Action::View)
    }

    pub fn can_create(&self, resource: Resource) -> bool {
        self.has_permission(resource, Action::Create)
    }

    pub fn can_edit(&self, resource: Resource) -> bool {
        self.has_permission(resource, Action::Edit)
    }

    pub fn can_delete(&self, resource: Resource) -> bool {
        self.has_permission(resource, Action::Delete)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_student(&self) -> bool {
        self.role() == Some(Role::Student)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Some(Role::Teacher)
    }

    pub fn is_coach(&self) -> bool {
        self.role() == Some(Role::Coach)
    }

    /// Like [`has_permission`](Self::has_permission) but as a `Result`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// session.permissions().require(Resource::Results, Action::Edit)?;
    /// // update the result
    /// ```
    pub fn require(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        if self.has_permission(resource, action) {
            return Ok(());
        }

        match self.role() {
            None => Err(AppError::unauthorized(format!(
                "Sign in required to {} {}",
                action, resource
            ))),
            Some(role) => Err(AppError::forbidden(format!(
                "Access denied. Role {} may not {} {}",
                role, action, resource
            ))),
        }
    }

    /// Every resource paired with the actions currently allowed on it.
    pub fn matrix(&self) -> Vec<(Resource, Vec<Action>)> {
        Resource::ALL
            .into_iter()
            .map(|resource| {
                let actions = Action::ALL
                    .into_iter()
                    .filter(|action| self.has_permission(resource, *action))
                    .collect();
                (resource, actions)
            })
            .collect()
    }
}
