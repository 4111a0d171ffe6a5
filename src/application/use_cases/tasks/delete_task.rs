use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;

pub struct DeleteTask<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> DeleteTask<'a, R> {
    pub async fn execute(&self, solver_id: Uuid, project_id: Uuid, task_id: Uuid) -> ServiceResult<()> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.delete_task(solver_id, task_id)?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, task_id = %task_id, "task_deleted");
        Ok(())
    }
}
