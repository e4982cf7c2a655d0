//! The role-based permission decision table.
//!
//! [`Policy::allows`] is a total, pure function of the role, the user's
//! overrides, and the requested `(resource, action)`. It performs no I/O and
//! keeps no state between calls, so it always reflects the identity passed in.
//!
//! Decision order (first match wins):
//!
//! 1. `super_admin`: always allowed
//! 2. `admin` / `principal`: an explicit override decides; otherwise the
//!    configured [`AdminPolicy`]
//! 3. `student`: `view` on profile, courses, sports, attendance, results, library
//! 4. `teacher`: view/create/edit on attendance and results; view/create on notices
//! 5. `coach`: view/edit on sports and participants
//! 6. no role: denied

use schoolgate_config::AdminPolicy;
use schoolgate_core::{Action, Resource};

use crate::overrides::PermissionOverrides;
use crate::roles::Role;

/// Resources a student may view.
pub const STUDENT_VIEWABLE: [Resource; 6] = [
    Resource::Profile,
    Resource::Courses,
    Resource::Sports,
    Resource::Attendance,
    Resource::Results,
    Resource::Library,
];

/// Resources a teacher may view, create, and edit.
pub const TEACHER_GRADEBOOK: [Resource; 2] = [Resource::Attendance, Resource::Results];

/// Resources a coach may view and edit.
pub const COACH_MANAGED: [Resource; 2] = [Resource::Sports, Resource::Participants];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub admin: AdminPolicy,
}

impl Policy {
    pub fn new(admin: AdminPolicy) -> Self {
        Self { admin }
    }

    pub fn allows(
        &self,
        role: Option<Role>,
        overrides: Option<&PermissionOverrides>,
        resource: Resource,
        action: Action,
    ) -> bool {
        let Some(role) = role else {
            return false;
        };

        match role {
            Role::SuperAdmin => true,
            Role::Admin | Role::Principal => {
                match overrides.and_then(|o| o.get(resource, action)) {
                    Some(allowed) => allowed,
                    None => self.admin == AdminPolicy::AllowByDefault,
                }
            }
            Role::Student => student_allows(resource, action),
            Role::Teacher => teacher_allows(resource, action),
            Role::Coach => coach_allows(resource, action),
        }
    }
}

fn student_allows(resource: Resource, action: Action) -> bool {
    action == Action::View && STUDENT_VIEWABLE.contains(&resource)
}

fn teacher_allows(resource: Resource, action: Action) -> bool {
    match resource {
        r if TEACHER_GRADEBOOK.contains(&r) => {
            matches!(action, Action::View | Action::Create | Action::Edit)
        }
        Resource::Notices => matches!(action, Action::View | Action::Create),
        _ => false,
    }
}

fn coach_allows(resource: Resource, action: Action) -> bool {
    COACH_MANAGED.contains(&resource) && matches!(action, Action::View | Action::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> impl Iterator<Item = (Resource, Action)> {
        Resource::ALL
            .into_iter()
            .flat_map(|r| Action::ALL.into_iter().map(move |a| (r, a)))
    }

    #[test]
    fn test_super_admin_allowed_everything() {
        let policy = Policy::default();
        let deny_all = PermissionOverrides::new().with(Resource::Results, Action::Delete, false);
        for (resource, action) in pairs() {
            assert!(policy.allows(Some(Role::SuperAdmin), None, resource, action));
            assert!(policy.allows(Some(Role::SuperAdmin), Some(&deny_all), resource, action));
        }
    }

    #[test]
    fn test_no_role_denied_everything() {
        let policy = Policy::default();
        for (resource, action) in pairs() {
            assert!(!policy.allows(None, None, resource, action));
        }
    }

    #[test]
    fn test_student_view_only() {
        let policy = Policy::default();
        let student = Some(Role::Student);
        assert!(policy.allows(student, None, Resource::Results, Action::View));
        assert!(!policy.allows(student, None, Resource::Results, Action::Edit));
        assert!(!policy.allows(student, None, Resource::Notices, Action::View));
        assert!(!policy.allows(student, None, Resource::Students, Action::View));

        let allowed: usize = pairs()
            .filter(|(r, a)| policy.allows(student, None, *r, *a))
            .count();
        assert_eq!(allowed, STUDENT_VIEWABLE.len());
    }

    #[test]
    fn test_teacher_table() {
        let policy = Policy::default();
        let teacher = Some(Role::Teacher);
        assert!(policy.allows(teacher, None, Resource::Attendance, Action::Create));
        assert!(policy.allows(teacher, None, Resource::Results, Action::Edit));
        assert!(!policy.allows(teacher, None, Resource::Results, Action::Delete));
        assert!(policy.allows(teacher, None, Resource::Notices, Action::Create));
        assert!(!policy.allows(teacher, None, Resource::Notices, Action::Edit));
        assert!(!policy.allows(teacher, None, Resource::Library, Action::View));
    }

    #[test]
    fn test_coach_table() {
        let policy = Policy::default();
        let coach = Some(Role::Coach);
        assert!(policy.allows(coach, None, Resource::Sports, Action::Edit));
        assert!(policy.allows(coach, None, Resource::Participants, Action::View));
        assert!(!policy.allows(coach, None, Resource::Sports, Action::Delete));
        assert!(!policy.allows(coach, None, Resource::Sports, Action::Create));
        assert!(!policy.allows(coach, None, Resource::Results, Action::View));
    }

    #[test]
    fn test_admin_override_honoured() {
        let policy = Policy::default();
        let overrides = PermissionOverrides::new().with(Resource::Results, Action::Delete, false);

        for role in [Role::Admin, Role::Principal] {
            assert!(!policy.allows(Some(role), Some(&overrides), Resource::Results, Action::Delete));
            assert!(policy.allows(Some(role), Some(&overrides), Resource::Results, Action::Edit));
            assert!(policy.allows(Some(role), None, Resource::Results, Action::Delete));
        }
    }

    #[test]
    fn test_admin_deny_by_default() {
        let policy = Policy::new(AdminPolicy::DenyByDefault);
        let overrides = PermissionOverrides::new().with(Resource::Library, Action::Edit, true);

        assert!(policy.allows(Some(Role::Admin), Some(&overrides), Resource::Library, Action::Edit));
        assert!(!policy.allows(Some(Role::Admin), Some(&overrides), Resource::Library, Action::View));
        assert!(!policy.allows(Some(Role::Principal), None, Resource::Results, Action::View));
        // Non-admin roles are unaffected by the admin policy.
        assert!(policy.allows(Some(Role::Student), None, Resource::Results, Action::View));
        assert!(policy.allows(Some(Role::SuperAdmin), None, Resource::Results, Action::Delete));
    }

    #[test]
    fn test_overrides_ignored_for_fixed_roles() {
        let policy = Policy::default();
        let overrides = PermissionOverrides::new().with(Resource::Library, Action::Delete, true);
        assert!(!policy.allows(Some(Role::Student), Some(&overrides), Resource::Library, Action::Delete));
        assert!(!policy.allows(Some(Role::Teacher), Some(&overrides), Resource::Library, Action::Delete));
    }
}
