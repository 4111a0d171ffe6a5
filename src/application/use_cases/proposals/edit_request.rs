use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::ProposalEdit;

pub struct EditRequest<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> EditRequest<'a, R> {
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        request_id: Uuid,
        edit: ProposalEdit,
    ) -> ServiceResult<()> {
        let mut project = helpers::load(self.repo, project_id).await?;
        project.edit_proposal(solver_id, request_id, edit)?;
        helpers::persist(self.repo, &project).await
    }
}
