use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::project_repository::ProjectFilter;
use crate::application::use_cases::projects::assign_solver::AssignSolver;
use crate::application::use_cases::projects::complete_project::CompleteProject;
use crate::application::use_cases::projects::get_project::GetProject;
use crate::application::use_cases::projects::list_projects::ListProjects;
use crate::application::use_cases::projects::review_task::ReviewTask;
use crate::bootstrap::app_context::AppContext;
use crate::domain::projects::project::{AssignmentDetails, ReviewDecision, TaskStatus};
use crate::domain::users::user::Role;
use crate::presentation::http::auth::{Bearer, require_role};
use crate::presentation::http::error::{ApiError, ApiJson};
use crate::presentation::http::projects::{ActionResponse, ProjectResponse, project_list};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    pub solver_id: Uuid,
    pub estimated_modules: Option<i32>,
    pub estimated_deadline: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewTaskRequest {
    /// `approve` or `reject`.
    pub action: String,
    pub feedback: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/buyer/projects", get(list_projects))
        .route("/buyer/projects/:id", get(get_project))
        .route("/buyer/projects/:id/assign", patch(assign_solver))
        .route("/buyer/projects/:id/complete", patch(complete_project))
        .route(
            "/buyer/projects/:id/tasks/:task_id/review",
            patch(review_task),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/buyer/projects", tag = "Buyer", responses(
    (status = 200, body = [ProjectResponse]),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn list_projects(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = ListProjects {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let rows = uc.execute(&buyer, ProjectFilter::OwnedBy(buyer.id)).await?;
    Ok(project_list(rows))
}

#[utoipa::path(get, path = "/api/buyer/projects/{id}", tag = "Buyer",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, body = ProjectResponse),
        (status = 403, body = crate::presentation::http::error::MessageResponse),
        (status = 404, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn get_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = GetProject {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let view = uc.execute_owned(&buyer, id).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(patch, path = "/api/buyer/projects/{id}/assign", tag = "Buyer",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse),
        (status = 409, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn assign_solver(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<AssignRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let repo = ctx.project_repo();
    let uc = AssignSolver {
        repo: repo.as_ref(),
    };
    let details = AssignmentDetails {
        estimated_modules: req.estimated_modules,
        estimated_deadline: req.estimated_deadline,
    };
    uc.execute(buyer.id, id, req.solver_id, details).await?;
    Ok(ActionResponse::ok("Solver assigned successfully"))
}

#[utoipa::path(patch, path = "/api/buyer/projects/{id}/complete", tag = "Buyer",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn complete_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let repo = ctx.project_repo();
    let uc = CompleteProject {
        repo: repo.as_ref(),
    };
    uc.execute(buyer.id, id).await?;
    Ok(ActionResponse::ok("Project marked as completed"))
}

#[utoipa::path(patch, path = "/api/buyer/projects/{id}/tasks/{task_id}/review", tag = "Buyer",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = ReviewTaskRequest,
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse),
        (status = 404, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn review_task(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<ReviewTaskRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let decision = ReviewDecision::parse(&req.action);
    let repo = ctx.project_repo();
    let uc = ReviewTask {
        repo: repo.as_ref(),
    };
    let project = uc
        .execute(buyer.id, id, task_id, decision, req.feedback)
        .await?;
    let accepted = project
        .task(task_id)
        .is_some_and(|t| t.status == TaskStatus::Accepted);
    Ok(ActionResponse::ok(if accepted {
        "Task accepted"
    } else {
        "Task rejected"
    }))
}
