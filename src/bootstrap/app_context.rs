use std::sync::Arc;

use crate::application::ports::project_repository::ProjectRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    project_repo: Arc<dyn ProjectRepository>,
}

impl AppServices {
    pub fn new(user_repo: Arc<dyn UserRepository>, project_repo: Arc<dyn ProjectRepository>) -> Self {
        Self {
            user_repo,
            project_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn project_repo(&self) -> Arc<dyn ProjectRepository> {
        self.services.project_repo.clone()
    }
}
