use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected::admin, public};
use crate::state::AppState;

/// Build the service router over the given state. Split out of main so
/// tests can drive the exact production routing in-process.
pub fn app(state: AppState) -> Router {
    let api = &config::config().api;

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected admin API; each handler opens with the guard
        .route("/api/admin/whoami", get(admin::whoami))
        .route("/api/admin/roles", get(admin::roles_get).post(admin::roles_post))
        .with_state(state);

    // Global middleware, toggled by configuration
    if api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}
