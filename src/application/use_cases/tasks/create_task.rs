use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::TaskDraft;

pub struct CreateTask<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> CreateTask<'a, R> {
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        draft: TaskDraft,
    ) -> ServiceResult<Uuid> {
        let mut project = helpers::load(self.repo, project_id).await?;
        let task_id = project.add_task(solver_id, draft)?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, task_id = %task_id, "task_created");
        Ok(task_id)
    }
}
