use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;

#[derive(Debug, Clone)]
pub struct SubmissionInput {
    pub zip_url: String,
    pub note: Option<String>,
}

pub struct SubmitTask<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> SubmitTask<'a, R> {
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        task_id: Uuid,
        input: SubmissionInput,
    ) -> ServiceResult<()> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.submit_task(
            solver_id,
            task_id,
            input.zip_url,
            input.note,
            chrono::Utc::now(),
        )?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, task_id = %task_id, "task_submitted");
        Ok(())
    }
}

/// Delivers work that was not planned as a milestone beforehand.
pub struct SubmitWork<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> SubmitWork<'a, R> {
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        title: String,
        input: SubmissionInput,
    ) -> ServiceResult<Uuid> {
        let mut project = helpers::load(self.repo, project_id).await?;
        let task_id = project.submit_work(
            solver_id,
            title,
            input.zip_url,
            input.note,
            chrono::Utc::now(),
        )?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, task_id = %task_id, "work_submitted");
        Ok(task_id)
    }
}
