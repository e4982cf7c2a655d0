use std::sync::Arc;

use schoolgate_auth::PermissionOverrides;
use schoolgate_config::{AdminPolicy, JwtConfig, SessionConfig};
use schoolgate_core::{Action, Resource};
use schoolgate_session::{MemoryStore, Session, SessionKeys, SessionStore, StoredAuthService};

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn test_session_config(admin_policy: AdminPolicy) -> SessionConfig {
    SessionConfig {
        admin_policy,
        ..SessionConfig::default()
    }
}

/// A session over a fresh in-memory store, plus the store for inspection.
#[allow(dead_code)]
pub fn memory_session(config: &SessionConfig) -> (Arc<MemoryStore>, Session) {
    let store = Arc::new(MemoryStore::new());
    let session = session_over(store.clone(), config);
    (store, session)
}

/// Load a session over an existing store, as a fresh process would.
#[allow(dead_code)]
pub fn session_over(store: Arc<dyn SessionStore>, config: &SessionConfig) -> Session {
    let provider = StoredAuthService::new(
        store,
        SessionKeys::new(config.key_prefix.clone()),
        test_jwt_config(),
    );
    Session::load(Arc::new(provider), config)
}

#[allow(dead_code)]
pub fn all_pairs() -> Vec<(Resource, Action)> {
    Resource::ALL
        .into_iter()
        .flat_map(|r| Action::ALL.into_iter().map(move |a| (r, a)))
        .collect()
}

#[allow(dead_code)]
pub fn deny_results_delete() -> PermissionOverrides {
    PermissionOverrides::new().with(Resource::Results, Action::Delete, false)
}
