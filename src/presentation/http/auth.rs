use crate::application::access;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::{Role, SolverProfile, User};
use crate::presentation::http::error::{ApiError, ApiJson};
use crate::presentation::http::users::{ListInput, UserResponse};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `User`, `Buyer` or `Problem Solver`; defaults to `User`.
    pub role: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<ListInput>,
    pub phone: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/signup", tag = "Auth", request_body = SignupRequest, security(()), responses(
    (status = 201, body = UserResponse),
    (status = 400, body = crate::presentation::http::error::MessageResponse),
    (status = 409, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let role = match req.role.as_deref().map(str::trim) {
        None | Some("") => Role::User,
        Some(s) => Role::parse(s).ok_or_else(|| ApiError::bad_request("Invalid role"))?,
    };
    let profile = SolverProfile {
        bio: req.bio,
        skills: req.skills.map(ListInput::into_vec).unwrap_or_default(),
        phone: req.phone,
        github: req.github,
    };
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        name: req.name,
        password: req.password,
        role,
        profile: Some(profile),
    };
    let user = uc.execute(&dto).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await?.ok_or_else(|| {
        ApiError::new(StatusCode::UNAUTHORIZED, "Invalid email or password.")
    })?;
    let token = issue_token(&ctx.cfg, user.id)?;

    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    tracing::debug!(user_id = %user.id, "login");

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = crate::presentation::http::error::MessageResponse)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let user = current_user(&ctx, bearer).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", security(()), responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie("", 0, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    (headers, StatusCode::NO_CONTENT)
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(t) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
        {
            return Ok(Bearer(t.trim().to_string()));
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(token) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|hdr| get_cookie(hdr, "access_token"))
            .filter(|t| !t.is_empty())
        {
            return Ok(Bearer(token));
        }

        Err(ApiError::unauthorized())
    }
}

pub(crate) fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )?;
    Ok(token)
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized())?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::unauthorized())
}

/// Resolves the caller with their current role. A token for a user that no
/// longer exists is treated as unauthenticated.
pub async fn current_user(ctx: &AppContext, bearer: Bearer) -> Result<User, ApiError> {
    let id = validate_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?.ok_or_else(ApiError::unauthorized)
}

pub async fn require_role(ctx: &AppContext, bearer: Bearer, role: Role) -> Result<User, ApiError> {
    let user = current_user(ctx, bearer).await?;
    access::require_role(&user, role)?;
    Ok(user)
}

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}
