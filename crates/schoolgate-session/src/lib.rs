//! # SchoolGate Session
//!
//! The persisted session accessor and the permission gate built on it.
//!
//! - [`store`]: [`SessionStore`] with in-memory and file backends
//! - [`keys`]: role-namespaced storage keys
//! - [`user`]: the cached [`SessionUser`] record
//! - [`provider`]: the [`AuthProvider`] seam and its store-backed implementation
//! - [`session`]: [`Session`], the identity accessor
//! - [`permissions`]: [`Permissions`], the decision view over a session
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use schoolgate_auth::Role;
//! use schoolgate_config::{JwtConfig, SessionConfig};
//! use schoolgate_core::Resource;
//! use schoolgate_session::{MemoryStore, Session, SessionKeys, SessionUser, StoredAuthService};
//!
//! let provider = StoredAuthService::new(
//!     Arc::new(MemoryStore::new()),
//!     SessionKeys::default(),
//!     JwtConfig::from_env(),
//! );
//! let mut session = Session::load(Arc::new(provider), &SessionConfig::default());
//! assert!(!session.is_authenticated());
//!
//! session.login(Role::Coach, SessionUser::new("Coach Carter")).unwrap();
//! assert!(session.permissions().can_edit(Resource::Sports));
//!
//! session.logout();
//! assert!(!session.permissions().can_view(Resource::Sports));
//! ```

pub mod keys;
pub mod permissions;
pub mod provider;
pub mod session;
pub mod store;
pub mod user;

// Re-export commonly used types at crate root
pub use keys::SessionKeys;
pub use permissions::Permissions;
pub use provider::{AuthProvider, StoredAuthService};
pub use session::{Redirect, Session, SessionState};
pub use store::{FileStore, MemoryStore, SessionStore, StoreError};
pub use user::SessionUser;
