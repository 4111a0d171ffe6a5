use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod admin;
pub mod auth;
pub mod buyer;
pub mod error;
pub mod health;
pub mod projects;
pub mod solver;
pub mod users;

#[cfg(test)]
mod tests;

/// Every `/api` route that runs against the application context. Health and
/// docs are mounted separately by the binary since they need the pool.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", projects::routes(ctx.clone()))
        .nest("/api", buyer::routes(ctx.clone()))
        .nest("/api", solver::routes(ctx.clone()))
        .nest("/api", admin::routes(ctx))
}
