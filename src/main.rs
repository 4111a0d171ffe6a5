use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use solverhub::application::use_cases::auth::seed_admin::SeedAdmin;
use solverhub::bootstrap::app_context::{AppContext, AppServices};
use solverhub::bootstrap::config::Config;
use solverhub::infrastructure::db::repositories::project_repository_sqlx::SqlxProjectRepository;
use solverhub::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            solverhub::presentation::http::auth::signup,
            solverhub::presentation::http::auth::login,
            solverhub::presentation::http::auth::logout,
            solverhub::presentation::http::auth::me,
            solverhub::presentation::http::users::request_role,
            solverhub::presentation::http::projects::create_project,
            solverhub::presentation::http::buyer::list_projects,
            solverhub::presentation::http::buyer::get_project,
            solverhub::presentation::http::buyer::assign_solver,
            solverhub::presentation::http::buyer::complete_project,
            solverhub::presentation::http::buyer::review_task,
            solverhub::presentation::http::solver::list_open_projects,
            solverhub::presentation::http::solver::get_project,
            solverhub::presentation::http::solver::apply,
            solverhub::presentation::http::solver::my_requests,
            solverhub::presentation::http::solver::edit_request,
            solverhub::presentation::http::solver::active_projects,
            solverhub::presentation::http::solver::create_task,
            solverhub::presentation::http::solver::update_task,
            solverhub::presentation::http::solver::delete_task,
            solverhub::presentation::http::solver::submit_task,
            solverhub::presentation::http::solver::submit_work,
            solverhub::presentation::http::solver::get_profile,
            solverhub::presentation::http::solver::update_profile,
            solverhub::presentation::http::admin::list_projects,
            solverhub::presentation::http::admin::list_users,
            solverhub::presentation::http::admin::update_role,
            solverhub::presentation::http::admin::stats,
            solverhub::presentation::http::admin::search,
            solverhub::presentation::http::health::health,
        ),
        components(schemas(
            solverhub::presentation::http::error::MessageResponse,
            solverhub::presentation::http::auth::SignupRequest,
            solverhub::presentation::http::auth::LoginRequest,
            solverhub::presentation::http::auth::LoginResponse,
            solverhub::presentation::http::users::ListInput,
            solverhub::presentation::http::users::ProfileInput,
            solverhub::presentation::http::users::ProfileResponse,
            solverhub::presentation::http::users::RoleRequestResponse,
            solverhub::presentation::http::users::UserResponse,
            solverhub::presentation::http::users::RequestRoleBody,
            solverhub::presentation::http::projects::PersonResponse,
            solverhub::presentation::http::projects::ProposalResponse,
            solverhub::presentation::http::projects::SubmissionResponse,
            solverhub::presentation::http::projects::TaskResponse,
            solverhub::presentation::http::projects::AssignmentResponse,
            solverhub::presentation::http::projects::ProgressResponse,
            solverhub::presentation::http::projects::ProjectResponse,
            solverhub::presentation::http::projects::ActionResponse,
            solverhub::presentation::http::projects::CreateProjectRequest,
            solverhub::presentation::http::buyer::AssignRequest,
            solverhub::presentation::http::buyer::ReviewTaskRequest,
            solverhub::presentation::http::solver::ApplyRequest,
            solverhub::presentation::http::solver::EditProposalRequest,
            solverhub::presentation::http::solver::CreateTaskRequest,
            solverhub::presentation::http::solver::UpdateTaskRequest,
            solverhub::presentation::http::solver::SubmitTaskRequest,
            solverhub::presentation::http::solver::SubmitWorkRequest,
            solverhub::presentation::http::admin::UpdateRoleRequest,
            solverhub::presentation::http::admin::StatsResponse,
            solverhub::presentation::http::admin::SearchResponse,
            solverhub::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Users", description = "Role requests"),
            (name = "Projects", description = "Project posting"),
            (name = "Buyer", description = "Buyer project management"),
            (name = "Solver", description = "Browsing, proposals and task delivery"),
            (name = "Admin", description = "Role approval and oversight"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "solverhub=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(api_port = cfg.api_port, production = cfg.is_production, "Starting SolverHub backend");

    // Database
    let pool = solverhub::infrastructure::db::connect_pool(&cfg.database_url).await?;
    solverhub::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let project_repo = Arc::new(SqlxProjectRepository::new(pool.clone()));

    if let Some(seed) = &cfg.admin_seed {
        SeedAdmin {
            repo: user_repo.as_ref(),
        }
        .execute(&seed.name, &seed.email, &seed.password)
        .await?;
    }

    let services = AppServices::new(user_repo, project_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
            .allow_methods(methods)
            .allow_headers(headers),
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    let app = solverhub::presentation::http::router(ctx)
        .nest(
            "/api",
            solverhub::presentation::http::health::routes(pool.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
    info!("shutting down");
}
