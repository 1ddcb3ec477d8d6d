use axum::response::Json;
use serde_json::{json, Value};

/// GET / - service info
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Festpass API",
            "version": version,
            "description": "Festival registration backend - admin authorization and role management",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "whoami": "/api/admin/whoami (protected - any admin level)",
                "roles": "/api/admin/roles (protected - owner/super_admin)",
            }
        }
    }))
}

/// GET /health - liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
