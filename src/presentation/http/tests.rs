use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::router;
use crate::application::test_support::{MemoryProjectRepository, MemoryUserRepository};
use crate::application::use_cases::auth::seed_admin::SeedAdmin;
use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;

fn app() -> (Router, AppContext) {
    let cfg = Config::from_lookup(|_| None).unwrap();
    let services = AppServices::new(
        Arc::new(MemoryUserRepository::default()),
        Arc::new(MemoryProjectRepository::default()),
    );
    let ctx = AppContext::new(cfg, services);
    (router(ctx.clone()), ctx)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn signup(app: &Router, name: &str, email: &str, role: &str, extra: Value) -> String {
    let mut body = json!({ "name": name, "email": email, "password": "s3cret-pass", "role": role });
    if let (Some(obj), Some(more)) = (body.as_object_mut(), extra.as_object()) {
        obj.extend(more.clone());
    }
    let (status, user) = send(app, Method::POST, "/api/auth/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{user}");
    user["id"].as_str().unwrap().to_string()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn signup_login_and_session() {
    let (app, _) = app();
    let id = signup(&app, "Ada", "Ada@Example.com", "User", json!({})).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User with this email already exists.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "Eve", "email": "eve@example.com", "password": "x", "role": "Admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, "ada@example.com", "s3cret-pass").await;
    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["role"], "User");

    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let req = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn role_gates() {
    let (app, _) = app();
    signup(&app, "Uma", "uma@example.com", "User", json!({})).await;
    signup(&app, "Bo", "bo@example.com", "Buyer", json!({})).await;
    let user = login(&app, "uma@example.com", "s3cret-pass").await;
    let buyer = login(&app, "bo@example.com", "s3cret-pass").await;

    let project = json!({ "title": "Site", "description": "Build it" });
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&user),
        Some(project.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: Buyer role required");

    let (status, _) = send(&app, Method::GET, "/api/admin/stats", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, "/api/solver/my-requests", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Browsing open projects only needs a session.
    let (status, list) = send(&app, Method::GET, "/api/solver/projects", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/buyer/projects/not-a-uuid",
        Some(&buyer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn project_lifecycle() {
    let (app, _) = app();
    signup(&app, "Bea", "bea@example.com", "Buyer", json!({})).await;
    let solver_id = signup(
        &app,
        "Sol",
        "sol@example.com",
        "Problem Solver",
        json!({ "skills": "rust, sql", "bio": "backend" }),
    )
    .await;
    signup(&app, "Otto", "otto@example.com", "Problem Solver", json!({})).await;
    let buyer = login(&app, "bea@example.com", "s3cret-pass").await;
    let solver = login(&app, "sol@example.com", "s3cret-pass").await;
    let other = login(&app, "otto@example.com", "s3cret-pass").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&buyer),
        Some(json!({
            "title": "Inventory API",
            "description": "REST service for stock levels",
            "tech_stack": ["rust", "postgres"],
            "budget": 1200
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = created["id"].as_str().unwrap().to_string();

    let (_, open) = send(&app, Method::GET, "/api/solver/projects", Some(&solver), None).await;
    assert_eq!(open.as_array().unwrap().len(), 1);
    assert_eq!(open[0]["buyer"]["name"], "Bea");
    assert_eq!(open[0]["status"], "open");

    let apply = json!({
        "project_id": project_id,
        "estimated_modules": 2,
        "description": "Two milestones",
        "deadline": "2026-12-01",
        "phone_number": "555-0100"
    });
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/solver/projects/apply",
        Some(&solver),
        Some(apply.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/solver/projects/apply",
        Some(&solver),
        Some(apply),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You have already applied to this project.");
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/solver/projects/apply",
        Some(&other),
        Some(json!({ "project_id": project_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let detail_uri = format!("/api/solver/projects/{project_id}");
    let (_, seen) = send(&app, Method::GET, &detail_uri, Some(&other), None).await;
    assert_eq!(seen["requests"].as_array().unwrap().len(), 1);

    let owner_uri = format!("/api/buyer/projects/{project_id}");
    let (status, full) = send(&app, Method::GET, &owner_uri, Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["requests"].as_array().unwrap().len(), 2);
    let mine = full["requests"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["solver_id"] == solver_id.as_str())
        .unwrap();
    assert_eq!(mine["solver"]["skills"], json!(["rust", "sql"]));

    let assign_uri = format!("/api/buyer/projects/{project_id}/assign");
    let assign = json!({ "solver_id": solver_id, "estimated_modules": 2 });
    let (status, _) = send(
        &app,
        Method::PATCH,
        &assign_uri,
        Some(&buyer),
        Some(assign.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::PATCH, &assign_uri, Some(&buyer), Some(assign)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, requests) = send(&app, Method::GET, "/api/solver/my-requests", Some(&other), None).await;
    assert_eq!(requests[0]["requests"][0]["status"], "rejected");

    let tasks_uri = format!("/api/solver/projects/{project_id}/tasks");
    let task = json!({ "title": "Schema", "description": "Tables and indexes" });
    let (status, _) = send(
        &app,
        Method::POST,
        &tasks_uri,
        Some(&other),
        Some(task.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, created) = send(&app, Method::POST, &tasks_uri, Some(&solver), Some(task)).await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("{tasks_uri}/{task_id}/submit"),
        Some(&solver),
        Some(json!({ "zip_url": "https://files.example.com/schema.zip", "note": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let review_uri = format!("/api/buyer/projects/{project_id}/tasks/{task_id}/review");
    let (status, _) = send(
        &app,
        Method::PATCH,
        &review_uri,
        Some(&buyer),
        Some(json!({ "action": "approve", "feedback": "Looks good" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("{tasks_uri}/{task_id}"),
        Some(&solver),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot edit an accepted task.");

    let (status, work) = send(
        &app,
        Method::POST,
        &format!("/api/solver/projects/{project_id}/submit"),
        Some(&solver),
        Some(json!({ "title": "Endpoints", "zip_url": "https://files.example.com/api.zip" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let work_id = work["id"].as_str().unwrap().to_string();

    let complete_uri = format!("/api/buyer/projects/{project_id}/complete");
    let (status, _) = send(&app, Method::PATCH, &complete_uri, Some(&buyer), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/buyer/projects/{project_id}/tasks/{work_id}/review"),
        Some(&buyer),
        Some(json!({ "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::PATCH, &complete_uri, Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, active) = send(
        &app,
        Method::GET,
        "/api/solver/active-projects",
        Some(&solver),
        None,
    )
    .await;
    assert_eq!(active[0]["status"], "completed");
    assert_eq!(active[0]["progress"]["accepted_tasks"], 2);
    assert_eq!(active[0]["progress"]["percent"], 100);
    assert_eq!(active[0]["assigned_solver"]["name"], "Sol");
}

#[tokio::test]
async fn role_requests_and_admin_oversight() {
    let (app, ctx) = app();
    let repo = ctx.user_repo();
    SeedAdmin {
        repo: repo.as_ref(),
    }
    .execute("Root", "root@example.com", "root-pass")
    .await
    .unwrap();
    let admin = login(&app, "root@example.com", "root-pass").await;

    let user_id = signup(&app, "Uma", "uma@example.com", "User", json!({})).await;
    let user = login(&app, "uma@example.com", "s3cret-pass").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user/request-role",
        Some(&user),
        Some(json!({ "requested_role": "Admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/user/request-role",
        Some(&user),
        Some(json!({ "requested_role": "Buyer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_request"]["status"], "pending");
    assert_eq!(body["role_request"]["requested_role"], "Buyer");

    let (_, users) = send(&app, Method::GET, "/api/admin/users", Some(&admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (status, approved) = send(
        &app,
        Method::PATCH,
        "/api/admin/users/update-role",
        Some(&admin),
        Some(json!({ "user_id": user_id, "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["role"], "Buyer");
    assert_eq!(approved["role_request"], Value::Null);

    // The same token now carries the new role.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&user),
        Some(json!({ "title": "Logo", "description": "Vector logo", "tech_stack": "figma" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/admin/users/update-role",
        Some(&admin),
        Some(json!({ "user_id": user_id, "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, stats) = send(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;
    assert_eq!(
        stats,
        json!({
            "total_users": 2,
            "total_projects": 1,
            "active_projects": 0,
            "completed_projects": 0
        })
    );

    let (_, found) = send(
        &app,
        Method::GET,
        "/api/admin/search?type=projects&query=LOGO",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["tech_stack"], json!(["figma"]));

    let (_, found) = send(
        &app,
        Method::GET,
        "/api/admin/search?type=users&query=uma",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(found[0]["email"], "uma@example.com");

    let (status, found) = send(
        &app,
        Method::GET,
        "/api/admin/search?type=invoices&query=x",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));

    let (_, open) = send(
        &app,
        Method::GET,
        "/api/admin/projects?status=open",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(open.as_array().unwrap().len(), 1);
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/admin/projects?status=archived",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn solver_profile() {
    let (app, _) = app();
    signup(&app, "Sol", "sol@example.com", "Problem Solver", json!({})).await;
    let solver = login(&app, "sol@example.com", "s3cret-pass").await;

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/api/solver/profile",
        Some(&solver),
        Some(json!({ "bio": "Systems", "skills": ["rust", "c"], "github": "sol" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["profile"]["skills"], json!(["rust", "c"]));

    let (_, me) = send(&app, Method::GET, "/api/solver/profile", Some(&solver), None).await;
    assert_eq!(me["profile"]["bio"], "Systems");
    assert_eq!(me["profile"]["github"], "sol");
}

#[tokio::test]
async fn lookups_precede_action_validation() {
    let (app, ctx) = app();
    let repo = ctx.user_repo();
    SeedAdmin {
        repo: repo.as_ref(),
    }
    .execute("Root", "root@example.com", "root-pass")
    .await
    .unwrap();
    let admin = login(&app, "root@example.com", "root-pass").await;
    signup(&app, "Bea", "bea@example.com", "Buyer", json!({})).await;
    signup(&app, "Bo", "bo@example.com", "Buyer", json!({})).await;
    let owner = login(&app, "bea@example.com", "s3cret-pass").await;
    let stranger = login(&app, "bo@example.com", "s3cret-pass").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&owner),
        Some(json!({ "title": "Site", "description": "Build it" })),
    )
    .await;
    let project_id = created["id"].as_str().unwrap().to_string();
    let bad = json!({ "action": "maybe" });

    let uri = format!(
        "/api/buyer/projects/{}/tasks/{}/review",
        uuid::Uuid::new_v4(),
        uuid::Uuid::new_v4()
    );
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&owner), Some(bad.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!(
        "/api/buyer/projects/{project_id}/tasks/{}/review",
        uuid::Uuid::new_v4()
    );
    let (status, body) = send(&app, Method::PATCH, &uri, Some(&stranger), Some(bad.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You are not the buyer of this project.");
    let (status, body) = send(&app, Method::PATCH, &uri, Some(&owner), Some(bad)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/admin/users/update-role",
        Some(&admin),
        Some(json!({ "user_id": uuid::Uuid::new_v4(), "action": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_bodies_render_as_messages() {
    let (app, _) = app();
    signup(&app, "Bea", "bea@example.com", "Buyer", json!({})).await;
    let buyer = login(&app, "bea@example.com", "s3cret-pass").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&buyer),
        Some(json!({ "description": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/projects")
        .header(header::AUTHORIZATION, format!("Bearer {buyer}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}
