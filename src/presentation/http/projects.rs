use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::projects::{PersonDto, ProjectViewDto};
use crate::application::use_cases::projects::create_project::CreateProject;
use crate::bootstrap::app_context::AppContext;
use crate::domain::projects::project::{NewProject, Project, Proposal, Task};
use crate::domain::users::user::Role;
use crate::presentation::http::auth::{Bearer, require_role};
use crate::presentation::http::error::{ApiError, ApiJson};
use crate::presentation::http::users::ListInput;

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

impl From<&PersonDto> for PersonResponse {
    fn from(p: &PersonDto) -> Self {
        PersonResponse {
            id: p.id,
            name: p.name.clone(),
            email: p.email.clone(),
            skills: p.skills.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProposalResponse {
    pub id: Uuid,
    pub solver_id: Uuid,
    pub solver: Option<PersonResponse>,
    pub estimated_modules: Option<i32>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub zip_url: String,
    pub note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub submission: Option<SubmissionResponse>,
    pub feedback: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        TaskResponse {
            id: t.id,
            title: t.title,
            description: t.description,
            deadline: t.deadline,
            status: t.status.as_str().to_string(),
            submission: t.submission.map(|s| SubmissionResponse {
                zip_url: s.zip_url,
                note: s.note,
                submitted_at: s.submitted_at,
            }),
            feedback: t.feedback,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub estimated_modules: Option<i32>,
    pub estimated_deadline: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub accepted_tasks: usize,
    pub total_tasks: usize,
    pub estimated_modules: Option<i32>,
    pub percent: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub budget: Option<i64>,
    pub status: String,
    pub buyer_id: Uuid,
    pub buyer: Option<PersonResponse>,
    pub assigned_solver_id: Option<Uuid>,
    pub assigned_solver: Option<PersonResponse>,
    pub assignment: Option<AssignmentResponse>,
    pub requests: Vec<ProposalResponse>,
    pub tasks: Vec<TaskResponse>,
    pub progress: ProgressResponse,
    pub created_at: DateTime<Utc>,
}

impl ProjectResponse {
    fn build(project: Project, person: impl Fn(Uuid) -> Option<PersonResponse>) -> Self {
        let progress = project.progress();
        let proposal = |r: Proposal| ProposalResponse {
            id: r.id,
            solver_id: r.solver_id,
            solver: person(r.solver_id),
            estimated_modules: r.estimated_modules,
            description: r.description,
            deadline: r.deadline,
            phone_number: r.phone_number,
            status: r.status.as_str().to_string(),
            submitted_at: r.submitted_at,
        };
        ProjectResponse {
            id: project.id,
            buyer: person(project.buyer_id),
            assigned_solver: project.assigned_solver_id.and_then(&person),
            title: project.title,
            description: project.description,
            tech_stack: project.tech_stack,
            budget: project.budget,
            status: project.status.as_str().to_string(),
            buyer_id: project.buyer_id,
            assigned_solver_id: project.assigned_solver_id,
            assignment: project.assignment.map(|a| AssignmentResponse {
                estimated_modules: a.estimated_modules,
                estimated_deadline: a.estimated_deadline,
            }),
            requests: project.requests.into_iter().map(proposal).collect(),
            tasks: project.tasks.into_iter().map(TaskResponse::from).collect(),
            progress: ProgressResponse {
                accepted_tasks: progress.accepted,
                total_tasks: progress.total,
                estimated_modules: progress.estimated_modules,
                percent: progress.percent(),
            },
            created_at: project.created_at,
        }
    }
}

impl From<ProjectViewDto> for ProjectResponse {
    fn from(view: ProjectViewDto) -> Self {
        let people = view.people;
        ProjectResponse::build(view.project, |id| people.get(&id).map(PersonResponse::from))
    }
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        ProjectResponse::build(project, |_| None)
    }
}

pub(crate) fn project_list(views: Vec<ProjectViewDto>) -> Json<Vec<ProjectResponse>> {
    Json(views.into_iter().map(ProjectResponse::from).collect())
}

/// Acknowledgement for state changes, carrying the id of anything created.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl ActionResponse {
    pub fn ok(message: &str) -> Json<Self> {
        Json(ActionResponse {
            message: message.to_string(),
            id: None,
        })
    }

    pub fn created(message: &str, id: Uuid) -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(ActionResponse {
                message: message.to_string(),
                id: Some(id),
            }),
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub tech_stack: Option<ListInput>,
    pub budget: Option<i64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/projects", post(create_project))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/projects", tag = "Projects", request_body = CreateProjectRequest, responses(
    (status = 201, body = ActionResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse),
    (status = 403, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn create_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ActionResponse>), ApiError> {
    let buyer = require_role(&ctx, bearer, Role::Buyer).await?;
    let repo = ctx.project_repo();
    let uc = CreateProject {
        repo: repo.as_ref(),
    };
    let draft = NewProject {
        title: req.title,
        description: req.description,
        tech_stack: req.tech_stack.map(ListInput::into_vec).unwrap_or_default(),
        budget: req.budget,
    };
    let project = uc.execute(buyer.id, draft).await?;
    Ok(ActionResponse::created(
        "Project created successfully",
        project.id,
    ))
}
