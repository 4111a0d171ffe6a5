use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::domain::projects::project::{NewProject, Project};

pub struct CreateProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> CreateProject<'a, R> {
    pub async fn execute(&self, buyer_id: Uuid, draft: NewProject) -> ServiceResult<Project> {
        let project = Project::new(buyer_id, draft, chrono::Utc::now())?;
        self.repo.insert(&project).await?;
        tracing::info!(project_id = %project.id, buyer_id = %buyer_id, "project_created");
        Ok(project)
    }
}
