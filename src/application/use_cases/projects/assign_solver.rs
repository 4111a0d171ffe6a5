use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::{AssignmentDetails, Project};

pub struct AssignSolver<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> AssignSolver<'a, R> {
    pub async fn execute(
        &self,
        buyer_id: Uuid,
        project_id: Uuid,
        solver_id: Uuid,
        details: AssignmentDetails,
    ) -> ServiceResult<Project> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.assign(buyer_id, solver_id, details)?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, solver_id = %solver_id, "project_assigned");
        Ok(project)
    }
}
