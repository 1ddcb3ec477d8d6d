use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::state::AppState;

use super::AdminLevel;

/// Authenticated admin identity attached to a request after the guard
/// passes. `user_id` feeds audit fields; `level` feeds level-gated
/// business logic.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user_id: String,
    pub level: AdminLevel,
}

/// Entry-point guard for every privileged route: verify the bearer
/// credential, resolve the admin level, and check it against the
/// allowed set.
///
/// Every authorization failure surfaces as the same 401 body. A caller
/// cannot tell a missing credential from a valid credential with no
/// admin role or the wrong level, so probing a route confirms nothing
/// about the admin table. This is the only place that 401 is built.
///
/// Nothing is cached across requests; a revoked role takes effect on
/// the next request.
pub async fn require_level(
    state: &AppState,
    headers: &HeaderMap,
    allowed: &[AdminLevel],
) -> Result<AdminContext, ApiError> {
    // Missing or malformed header fails before the verifier is contacted.
    let token = match extract_bearer_token(headers) {
        Some(token) => token,
        None => {
            tracing::debug!("rejected request without usable bearer token");
            return Err(unauthorized());
        }
    };

    let user_id = match state.verifier.verify(token).await {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!("bearer token verification failed: {}", e);
            return Err(unauthorized());
        }
    };

    // Store failures are infrastructure errors, not "not an admin".
    let level = state.resolver.resolve_level(&user_id).await?;

    match level {
        Some(level) if allowed.contains(&level) => Ok(AdminContext { user_id, level }),
        Some(level) => {
            tracing::warn!(
                "admin '{}' with level '{}' rejected by level gate",
                user_id,
                level
            );
            Err(unauthorized())
        }
        None => {
            tracing::debug!("authenticated user '{}' holds no admin role", user_id);
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized")
}

/// Pull the token out of `Authorization: Bearer <token>`. Returns None
/// for a missing header, non-ASCII value, wrong scheme, or empty token.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
