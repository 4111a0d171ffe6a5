use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::dto::admin::SearchResultsDto;
use crate::application::use_cases::admin::list_projects::ListAllProjects;
use crate::application::use_cases::admin::list_users::ListUsers;
use crate::application::use_cases::admin::review_role_request::{ReviewRoleRequest, RoleDecision};
use crate::application::use_cases::admin::search::{Search, SearchTarget};
use crate::application::use_cases::admin::stats::GetStats;
use crate::bootstrap::app_context::AppContext;
use crate::domain::projects::project::ProjectStatus;
use crate::domain::users::user::Role;
use crate::presentation::http::auth::{Bearer, require_role};
use crate::presentation::http::error::{ApiError, ApiJson};
use crate::presentation::http::projects::{ProjectResponse, project_list};
use crate::presentation::http::users::UserResponse;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectsQuery {
    /// `open`, `assigned` or `completed`.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub user_id: Uuid,
    /// `approve` or `reject`.
    pub action: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// `projects` or `users`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SearchResponse {
    Projects(Vec<ProjectResponse>),
    Users(Vec<UserResponse>),
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/projects", get(list_projects))
        .route("/admin/users", get(list_users))
        .route("/admin/users/update-role", patch(update_role))
        .route("/admin/stats", get(stats))
        .route("/admin/search", get(search))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/admin/projects", tag = "Admin", params(ProjectsQuery), responses(
    (status = 200, body = [ProjectResponse]),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn list_projects(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Query(q): Query<ProjectsQuery>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    require_role(&ctx, bearer, Role::Admin).await?;
    let status = match q.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(
            ProjectStatus::parse(s).ok_or_else(|| ApiError::bad_request("Invalid status"))?,
        ),
    };
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = ListAllProjects {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    Ok(project_list(uc.execute(status).await?))
}

#[utoipa::path(get, path = "/api/admin/users", tag = "Admin", responses(
    (status = 200, body = [UserResponse]),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_role(&ctx, bearer, Role::Admin).await?;
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(patch, path = "/api/admin/users/update-role", tag = "Admin", request_body = UpdateRoleRequest, responses(
    (status = 200, body = UserResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse),
    (status = 404, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn update_role(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require_role(&ctx, bearer, Role::Admin).await?;
    let decision = RoleDecision::parse(&req.action);
    let repo = ctx.user_repo();
    let uc = ReviewRoleRequest {
        repo: repo.as_ref(),
    };
    let user = uc.execute(req.user_id, decision).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(get, path = "/api/admin/stats", tag = "Admin", responses(
    (status = 200, body = StatsResponse),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn stats(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<StatsResponse>, ApiError> {
    require_role(&ctx, bearer, Role::Admin).await?;
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = GetStats {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let s = uc.execute().await?;
    Ok(Json(StatsResponse {
        total_users: s.total_users,
        total_projects: s.total_projects,
        active_projects: s.active_projects,
        completed_projects: s.completed_projects,
    }))
}

#[utoipa::path(get, path = "/api/admin/search", tag = "Admin", params(SearchQuery), responses(
    (status = 200, body = SearchResponse),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn search(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Query(q): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_role(&ctx, bearer, Role::Admin).await?;
    let target = q.kind.as_deref().and_then(SearchTarget::parse);
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = Search {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let found = uc
        .execute(target, q.query.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(match found {
        SearchResultsDto::Projects(rows) => {
            SearchResponse::Projects(rows.into_iter().map(ProjectResponse::from).collect())
        }
        SearchResultsDto::Users(rows) => {
            SearchResponse::Users(rows.into_iter().map(UserResponse::from).collect())
        }
        SearchResultsDto::Empty => SearchResponse::Users(Vec::new()),
    }))
}
