use std::sync::Arc;

use crate::auth::{IdentityVerifier, JwtVerifier};
use crate::authz::{RolePolicy, RoleResolver};
use crate::store::{DocumentStore, ParticipantDirectory, RoleTable};

/// Shared application state handed to every handler. The verifier and
/// resolver are built once at startup with their configuration
/// injected; handlers never consult global config per request.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn IdentityVerifier>,
    pub resolver: Arc<RoleResolver>,
    pub policy: Arc<RolePolicy>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        jwt_secret: &str,
        bootstrap_owner: Option<String>,
    ) -> Self {
        let roles = RoleTable::new(store.clone());
        let participants = ParticipantDirectory::new(store);
        let resolver = Arc::new(RoleResolver::new(bootstrap_owner, roles.clone()));
        let policy = Arc::new(RolePolicy::new(resolver.clone(), roles, participants));

        Self {
            verifier: Arc::new(JwtVerifier::new(jwt_secret)),
            resolver,
            policy,
        }
    }
}
