//! # SchoolGate
//!
//! Session and permission gate for the school-management portal.
//!
//! The workspace is split the same way the portal's concerns are:
//!
//! ```text
//! crates/
//! ├── schoolgate-core/      # AppError, Resource, Action
//! ├── schoolgate-config/    # SessionConfig, JwtConfig, AdminPolicy
//! ├── schoolgate-auth/      # Role, PermissionOverrides, Policy, session tokens
//! └── schoolgate-session/   # SessionStore backends, Session, Permissions
//! src/
//! ├── cli/                  # `schoolgate` command-line front-end
//! └── logging.rs            # tracing subscriber setup
//! ```
//!
//! ## Roles
//!
//! | Role          | Default access                                              |
//! |---------------|-------------------------------------------------------------|
//! | `super_admin` | everything                                                  |
//! | `admin`       | everything unless a per-user override denies it             |
//! | `principal`   | same as `admin`                                             |
//! | `student`     | view profile, courses, sports, attendance, results, library |
//! | `teacher`     | view/create/edit attendance and results; view/create notices|
//! | `coach`       | view/edit sports and participants                           |
//!
//! Anything not listed is denied, including every request made while signed out.

use std::sync::Arc;

use schoolgate_config::{JwtConfig, SessionConfig};
use schoolgate_session::{FileStore, Session, SessionKeys, StoredAuthService};

pub mod cli;
pub mod logging;

/// Open the file-backed session described by `session_config` and load it.
pub fn open_file_session(session_config: &SessionConfig, jwt_config: JwtConfig) -> Session {
    let store = FileStore::new(&session_config.session_file);
    let provider = StoredAuthService::new(
        Arc::new(store),
        SessionKeys::new(session_config.key_prefix.clone()),
        jwt_config,
    );

    Session::load(Arc::new(provider), session_config)
}
