use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::errors::DomainError;
use crate::domain::projects::project::{Project, ReviewDecision};

pub struct ReviewTask<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> ReviewTask<'a, R> {
    pub async fn execute(
        &self,
        buyer_id: Uuid,
        project_id: Uuid,
        task_id: Uuid,
        decision: Option<ReviewDecision>,
        feedback: Option<String>,
    ) -> ServiceResult<Project> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.ensure_owner(buyer_id)?;
        project.task(task_id).ok_or(DomainError::NotFound("Task"))?;
        let decision = decision.ok_or(DomainError::Invalid("Invalid action"))?;
        let status = project.review_task(buyer_id, task_id, decision, feedback)?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, task_id = %task_id, status = status.as_str(), "task_reviewed");
        Ok(project)
    }
}
