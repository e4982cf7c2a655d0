//! # SchoolGate Auth
//!
//! Identity roles, the permission decision table, and session tokens.
//!
//! - [`roles`]: the closed [`Role`] enum and its storage slots
//! - [`overrides`]: typed per-user [`PermissionOverrides`]
//! - [`policy`]: [`Policy::allows`], the role-based decision function
//! - [`claims`] / [`jwt`]: signed session tokens
//!
//! # Example
//!
//! ```
//! use schoolgate_auth::{Policy, Role};
//! use schoolgate_core::{Action, Resource};
//!
//! let policy = Policy::default();
//! assert!(policy.allows(Some(Role::Teacher), None, Resource::Attendance, Action::Create));
//! assert!(!policy.allows(Some(Role::Teacher), None, Resource::Library, Action::View));
//! assert!(!policy.allows(None, None, Resource::Profile, Action::View));
//! ```

pub mod claims;
pub mod jwt;
pub mod overrides;
pub mod policy;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_session_token, verify_session_token};
pub use overrides::PermissionOverrides;
pub use policy::Policy;
pub use roles::Role;
