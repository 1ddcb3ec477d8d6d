use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::authz::{require_level, AdminLevel, RoleListing, SetRoleOutcome};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub user_id: String,
    /// One of "owner", "super_admin", "event_admin", or null to revoke.
    /// Kept as a raw string so an unknown value is a 400 with a clear
    /// message instead of a deserialization rejection.
    pub role: Option<String>,
}

/// GET /api/admin/whoami - resolved identity and level of the caller.
/// Any admin level may ask; the answer drives level-gated UI.
pub async fn whoami(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Value> {
    let ctx = require_level(&state, &headers, &AdminLevel::ALL).await?;

    Ok(ApiResponse::success(json!({
        "user_id": ctx.user_id,
        "level": ctx.level,
    })))
}

/// GET /api/admin/roles - visibility-filtered role listing plus the
/// owner id set (bootstrap identity and any legacy owner rows).
pub async fn roles_get(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<RoleListing> {
    let ctx = require_level(
        &state,
        &headers,
        &[AdminLevel::Owner, AdminLevel::SuperAdmin],
    )
    .await?;

    let listing = state.policy.list_roles(&ctx).await?;
    Ok(ApiResponse::success(listing))
}

/// POST /api/admin/roles - grant or revoke a role. A null role revokes.
pub async fn roles_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SetRoleRequest>,
) -> ApiResult<SetRoleOutcome> {
    let ctx = require_level(
        &state,
        &headers,
        &[AdminLevel::Owner, AdminLevel::SuperAdmin],
    )
    .await?;

    if payload.user_id.trim().is_empty() {
        return Err(ApiError::bad_request("Missing target user id"));
    }

    let new_role = match payload.role.as_deref() {
        None => None,
        Some(s) => Some(
            s.parse::<AdminLevel>()
                .map_err(|_| ApiError::bad_request("Invalid role value"))?,
        ),
    };

    let outcome = state
        .policy
        .set_role(&ctx, &payload.user_id, new_role)
        .await?;

    Ok(ApiResponse::success(outcome))
}
