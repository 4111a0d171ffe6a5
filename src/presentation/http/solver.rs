use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::project_repository::ProjectFilter;
use crate::application::use_cases::projects::get_project::GetProject;
use crate::application::use_cases::projects::list_projects::ListProjects;
use crate::application::use_cases::proposals::apply::ApplyToProject;
use crate::application::use_cases::proposals::edit_request::EditRequest;
use crate::application::use_cases::tasks::create_task::CreateTask;
use crate::application::use_cases::tasks::delete_task::DeleteTask;
use crate::application::use_cases::tasks::submit_task::{SubmissionInput, SubmitTask, SubmitWork};
use crate::application::use_cases::tasks::update_task::UpdateTask;
use crate::application::use_cases::users::profile::{GetProfile, UpdateProfile};
use crate::bootstrap::app_context::AppContext;
use crate::domain::projects::project::{
    ProjectStatus, ProposalDraft, ProposalEdit, TaskDraft, TaskEdit,
};
use crate::domain::users::user::{Role, SolverProfile};
use crate::presentation::http::auth::{Bearer, current_user, require_role};
use crate::presentation::http::error::{ApiError, ApiJson};
use crate::presentation::http::projects::{ActionResponse, ProjectResponse, project_list};
use crate::presentation::http::users::{ProfileInput, UserResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyRequest {
    pub project_id: Uuid,
    pub estimated_modules: Option<i32>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditProposalRequest {
    pub project_id: Uuid,
    pub request_id: Uuid,
    pub description: Option<String>,
    pub estimated_modules: Option<i32>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitTaskRequest {
    pub zip_url: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitWorkRequest {
    pub title: String,
    pub zip_url: String,
    pub note: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/solver/projects", get(list_open_projects))
        .route("/solver/projects/apply", post(apply))
        .route("/solver/projects/:id", get(get_project))
        .route("/solver/projects/:id/submit", post(submit_work))
        .route("/solver/projects/:id/tasks", post(create_task))
        .route(
            "/solver/projects/:id/tasks/:task_id",
            patch(update_task).delete(delete_task),
        )
        .route(
            "/solver/projects/:id/tasks/:task_id/submit",
            post(submit_task),
        )
        .route("/solver/my-requests", get(my_requests))
        .route("/solver/my-requests/edit", patch(edit_request))
        .route("/solver/active-projects", get(active_projects))
        .route("/solver/profile", get(get_profile).patch(update_profile))
        .with_state(ctx)
}

async fn list_for(
    ctx: &AppContext,
    bearer: Bearer,
    role: Option<Role>,
    filter: impl FnOnce(Uuid) -> ProjectFilter,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let viewer = match role {
        Some(role) => require_role(ctx, bearer, role).await?,
        None => current_user(ctx, bearer).await?,
    };
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = ListProjects {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let rows = uc.execute(&viewer, filter(viewer.id)).await?;
    Ok(project_list(rows))
}

#[utoipa::path(get, path = "/api/solver/projects", tag = "Solver", responses(
    (status = 200, body = [ProjectResponse])
))]
pub async fn list_open_projects(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    list_for(&ctx, bearer, None, |_| ProjectFilter::Status(ProjectStatus::Open)).await
}

#[utoipa::path(get, path = "/api/solver/projects/{id}", tag = "Solver",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, body = ProjectResponse),
        (status = 404, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn get_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let viewer = current_user(&ctx, bearer).await?;
    let projects = ctx.project_repo();
    let users = ctx.user_repo();
    let uc = GetProject {
        projects: projects.as_ref(),
        users: users.as_ref(),
    };
    let view = uc.execute(&viewer, id).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(post, path = "/api/solver/projects/apply", tag = "Solver", request_body = ApplyRequest, responses(
    (status = 201, body = ActionResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse),
    (status = 409, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn apply(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<ApplyRequest>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = ApplyToProject {
        repo: repo.as_ref(),
    };
    let draft = ProposalDraft {
        estimated_modules: req.estimated_modules,
        description: req.description,
        deadline: req.deadline,
        phone_number: req.phone_number,
    };
    let request_id = uc.execute(solver.id, req.project_id, draft).await?;
    Ok(ActionResponse::created(
        "Request submitted successfully",
        request_id,
    ))
}

#[utoipa::path(get, path = "/api/solver/my-requests", tag = "Solver", responses(
    (status = 200, body = [ProjectResponse])
))]
pub async fn my_requests(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    list_for(&ctx, bearer, Some(Role::ProblemSolver), ProjectFilter::AppliedBy).await
}

#[utoipa::path(patch, path = "/api/solver/my-requests/edit", tag = "Solver", request_body = EditProposalRequest, responses(
    (status = 200, body = ActionResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn edit_request(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<EditProposalRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = EditRequest {
        repo: repo.as_ref(),
    };
    let edit = ProposalEdit {
        estimated_modules: req.estimated_modules,
        description: req.description,
        deadline: req.deadline,
    };
    uc.execute(solver.id, req.project_id, req.request_id, edit)
        .await?;
    Ok(ActionResponse::ok("Request updated successfully"))
}

#[utoipa::path(get, path = "/api/solver/active-projects", tag = "Solver", responses(
    (status = 200, body = [ProjectResponse])
))]
pub async fn active_projects(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    list_for(&ctx, bearer, Some(Role::ProblemSolver), ProjectFilter::AssignedTo).await
}

#[utoipa::path(post, path = "/api/solver/projects/{id}/tasks", tag = "Solver",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, body = ActionResponse),
        (status = 403, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn create_task(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = CreateTask {
        repo: repo.as_ref(),
    };
    let draft = TaskDraft {
        title: req.title,
        description: req.description,
        deadline: req.deadline,
    };
    let task_id = uc.execute(solver.id, id, draft).await?;
    Ok(ActionResponse::created("Task created", task_id))
}

#[utoipa::path(patch, path = "/api/solver/projects/{id}/tasks/{task_id}", tag = "Solver",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn update_task(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = UpdateTask {
        repo: repo.as_ref(),
    };
    let edit = TaskEdit {
        title: req.title,
        description: req.description,
        deadline: req.deadline,
    };
    uc.execute(solver.id, id, task_id, edit).await?;
    Ok(ActionResponse::ok("Task updated"))
}

#[utoipa::path(delete, path = "/api/solver/projects/{id}/tasks/{task_id}", tag = "Solver",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn delete_task(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ActionResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = DeleteTask {
        repo: repo.as_ref(),
    };
    uc.execute(solver.id, id, task_id).await?;
    Ok(ActionResponse::ok("Task deleted"))
}

#[utoipa::path(post, path = "/api/solver/projects/{id}/tasks/{task_id}/submit", tag = "Solver",
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = SubmitTaskRequest,
    responses(
        (status = 200, body = ActionResponse),
        (status = 400, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn submit_task(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
    ApiJson(req): ApiJson<SubmitTaskRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = SubmitTask {
        repo: repo.as_ref(),
    };
    let input = SubmissionInput {
        zip_url: req.zip_url,
        note: req.note,
    };
    uc.execute(solver.id, id, task_id, input).await?;
    Ok(ActionResponse::ok("Task submitted"))
}

#[utoipa::path(post, path = "/api/solver/projects/{id}/submit", tag = "Solver",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = SubmitWorkRequest,
    responses(
        (status = 201, body = ActionResponse),
        (status = 403, body = crate::presentation::http::error::MessageResponse)
    ))]
pub async fn submit_work(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<SubmitWorkRequest>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.project_repo();
    let uc = SubmitWork {
        repo: repo.as_ref(),
    };
    let input = SubmissionInput {
        zip_url: req.zip_url,
        note: req.note,
    };
    let task_id = uc.execute(solver.id, id, req.title, input).await?;
    Ok(ActionResponse::created("Work submitted", task_id))
}

#[utoipa::path(get, path = "/api/solver/profile", tag = "Solver", responses(
    (status = 200, body = UserResponse)
))]
pub async fn get_profile(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.user_repo();
    let uc = GetProfile {
        repo: repo.as_ref(),
    };
    let user = uc.execute(solver.id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(patch, path = "/api/solver/profile", tag = "Solver", request_body = ProfileInput, responses(
    (status = 200, body = UserResponse)
))]
pub async fn update_profile(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<ProfileInput>,
) -> Result<Json<UserResponse>, ApiError> {
    let solver = require_role(&ctx, bearer, Role::ProblemSolver).await?;
    let repo = ctx.user_repo();
    let uc = UpdateProfile {
        repo: repo.as_ref(),
    };
    let user = uc.execute(solver.id, SolverProfile::from(req)).await?;
    Ok(Json(user.into()))
}
