use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::TaskEdit;

pub struct UpdateTask<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> UpdateTask<'a, R> {
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        task_id: Uuid,
        edit: TaskEdit,
    ) -> ServiceResult<()> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.update_task(solver_id, task_id, edit)?;
        helpers::persist(self.repo, &project).await
    }
}
