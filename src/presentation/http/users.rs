use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::users::request_role::RequestRole;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Role, SolverProfile, User, parse_list};
use crate::presentation::http::auth::{Bearer, current_user};
use crate::presentation::http::error::{ApiError, ApiJson};

/// A list accepted either as a JSON array or as a comma-separated string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ListInput {
    List(Vec<String>),
    Csv(String),
}

impl ListInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ListInput::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            ListInput::Csv(csv) => parse_list(&csv),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileInput {
    pub bio: Option<String>,
    pub skills: Option<ListInput>,
    pub phone: Option<String>,
    pub github: Option<String>,
}

impl From<ProfileInput> for SolverProfile {
    fn from(p: ProfileInput) -> Self {
        SolverProfile {
            bio: p.bio,
            skills: p.skills.map(ListInput::into_vec).unwrap_or_default(),
            phone: p.phone,
            github: p.github,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
}

impl From<SolverProfile> for ProfileResponse {
    fn from(p: SolverProfile) -> Self {
        ProfileResponse {
            bio: p.bio,
            skills: p.skills,
            phone: p.phone,
            github: p.github,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleRequestResponse {
    pub requested_role: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub role_request: Option<RoleRequestResponse>,
    pub profile: Option<ProfileResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            role_request: u.role_request.map(|r| RoleRequestResponse {
                requested_role: r.requested_role.as_str().to_string(),
                status: r.status.as_str().to_string(),
                submitted_at: r.submitted_at,
            }),
            profile: u.profile.map(ProfileResponse::from),
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestRoleBody {
    /// `Buyer` or `Problem Solver`.
    pub requested_role: String,
    pub profile: Option<ProfileInput>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/user/request-role", post(request_role))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/user/request-role", tag = "Users", request_body = RequestRoleBody, responses(
    (status = 200, body = UserResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn request_role(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(req): ApiJson<RequestRoleBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = current_user(&ctx, bearer).await?;
    let requested = Role::parse(req.requested_role.trim())
        .ok_or_else(|| ApiError::bad_request("Invalid role requested"))?;
    let repo = ctx.user_repo();
    let uc = RequestRole {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(user.id, requested, req.profile.map(SolverProfile::from))
        .await?;
    Ok(Json(user.into()))
}
