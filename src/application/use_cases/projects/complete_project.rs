use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::Project;

pub struct CompleteProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> CompleteProject<'a, R> {
    pub async fn execute(&self, buyer_id: Uuid, project_id: Uuid) -> ServiceResult<Project> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.complete(buyer_id)?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, "project_completed");
        Ok(project)
    }
}
