//! In-process tests for the guarded admin API, driving the production
//! router directly.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use festpass_api::auth::issue_token;
use festpass_api::store::{DocumentStore, MemoryStore};
use festpass_api::{app, AppState};

const SECRET: &str = "test-secret";

async fn setup(bootstrap: Option<&str>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    for (id, name) in [
        ("U2", "Marco"),
        ("U3", "Dana"),
        ("U4", "Priya"),
        ("U5", "Theo"),
    ] {
        store
            .set(
                "participants",
                id,
                json!({
                    "user_id": id,
                    "full_name": name,
                    "email": format!("{}@fest.example", name.to_lowercase()),
                }),
            )
            .await
            .unwrap();
    }

    let state = AppState::new(store.clone(), SECRET, bootstrap.map(String::from));
    (app(state), store)
}

fn bearer(user_id: &str) -> String {
    format!("Bearer {}", issue_token(user_id, SECRET).unwrap())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_role(token: &str, user_id: &str, role: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/admin/roles")
        .header("authorization", token)
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "user_id": user_id, "role": role }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn whoami_reports_resolved_level() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;

    let (status, body) = send(&app, get("/api/admin/whoami", Some(&bearer("U1")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], "owner");
    Ok(())
}

#[tokio::test]
async fn table_super_admin_passes_guard_without_bootstrap() -> Result<()> {
    // No bootstrap owner configured; a pre-existing table row (as a
    // migration would leave behind) still grants super_admin.
    let (app, store) = setup(None).await;
    store
        .set(
            "admins",
            "U2",
            json!({
                "user_id": "U2",
                "role": "super_admin",
                "full_name": "Marco",
                "email": "marco@fest.example",
                "added_by": "migration",
                "added_at": "2026-01-01T00:00:00Z",
            }),
        )
        .await
        .unwrap();

    let (status, body) = send(&app, get("/api/admin/whoami", Some(&bearer("U2")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], "super_admin");
    Ok(())
}

#[tokio::test]
async fn owner_grants_and_lists_roles() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;
    let owner = bearer("U1");

    let (status, body) = send(&app, post_role(&owner, "U2", json!("super_admin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outcome"], "granted");
    assert_eq!(body["data"]["record"]["added_by"], "U1");
    assert_eq!(body["data"]["record"]["full_name"], "Marco");

    let (status, _) = send(&app, post_role(&owner, "U3", json!("event_admin"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/admin/roles", Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["owners"], json!(["U1"]));
    Ok(())
}

#[tokio::test]
async fn super_admin_sees_only_event_admin_rows() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;
    let owner = bearer("U1");

    send(&app, post_role(&owner, "U2", json!("super_admin"))).await;
    send(&app, post_role(&owner, "U3", json!("event_admin"))).await;
    send(&app, post_role(&owner, "U4", json!("event_admin"))).await;

    let (status, body) = send(&app, get("/api/admin/roles", Some(&bearer("U2")))).await;
    assert_eq!(status, StatusCode::OK);
    let roles = body["data"]["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 2);
    assert!(roles.iter().all(|r| r["role"] == "event_admin"));
    Ok(())
}

#[tokio::test]
async fn super_admin_cannot_assign_super_admin() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;
    send(&app, post_role(&bearer("U1"), "U2", json!("super_admin"))).await;

    let (status, body) = send(&app, post_role(&bearer("U2"), "U3", json!("super_admin"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only owner can assign super_admin");
    Ok(())
}

#[tokio::test]
async fn granting_to_a_non_participant_is_400() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;

    let (status, body) = send(&app, post_role(&bearer("U1"), "U99", json!("event_admin"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User is not a participant");
    Ok(())
}

#[tokio::test]
async fn unknown_role_value_is_400() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;

    let (status, body) = send(&app, post_role(&bearer("U1"), "U2", json!("root"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid role value");
    Ok(())
}

#[tokio::test]
async fn null_role_revokes_and_is_idempotent() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;
    let owner = bearer("U1");
    send(&app, post_role(&owner, "U3", json!("event_admin"))).await;

    for _ in 0..2 {
        let (status, body) = send(&app, post_role(&owner, "U3", Value::Null)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"], "revoked");
    }

    // Revoked admin no longer passes the guard.
    let (status, _) = send(&app, get("/api/admin/whoami", Some(&bearer("U3")))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn table_written_owner_row_does_not_elevate() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;

    let (status, _) = send(&app, post_role(&bearer("U1"), "U4", json!("owner"))).await;
    assert_eq!(status, StatusCode::OK);

    // U4 holds an owner row in the table but still fails the guard:
    // only the bootstrap mechanism grants owner.
    let (status, body) = send(&app, get("/api/admin/whoami", Some(&bearer("U4")))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    // The listing still surfaces U4 in the owner id set.
    let (_, body) = send(&app, get("/api/admin/roles", Some(&bearer("U1")))).await;
    let owners = body["data"]["owners"].as_array().unwrap();
    assert!(owners.contains(&json!("U1")));
    assert!(owners.contains(&json!("U4")));
    Ok(())
}

#[tokio::test]
async fn cors_headers_applied_when_enabled() -> Result<()> {
    // Development defaults enable CORS, so the router must carry the
    // layer and answer cross-origin requests with an allow header.
    let (app, _) = setup(Some("U1")).await;

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
    Ok(())
}

#[tokio::test]
async fn unauthenticated_and_non_admin_get_identical_401s() -> Result<()> {
    let (app, _) = setup(Some("U1")).await;

    // No credential at all.
    let (status_a, body_a) = send(&app, get("/api/admin/roles", None)).await;
    // Valid token for a participant with no admin role.
    let (status_b, body_b) = send(&app, get("/api/admin/roles", Some(&bearer("U5")))).await;
    // Valid token for an event_admin hitting an owner/super_admin route.
    send(&app, post_role(&bearer("U1"), "U3", json!("event_admin"))).await;
    let (status_c, body_c) = send(&app, get("/api/admin/roles", Some(&bearer("U3")))).await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(status_b, status_c);
    assert_eq!(body_a, body_b);
    assert_eq!(body_b, body_c);
    Ok(())
}
