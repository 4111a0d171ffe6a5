use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::use_cases::projects::helpers;
use crate::domain::projects::project::ProposalDraft;

pub struct ApplyToProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> ApplyToProject<'a, R> {
    /// Returns the id of the new proposal.
    pub async fn execute(
        &self,
        solver_id: Uuid,
        project_id: Uuid,
        draft: ProposalDraft,
    ) -> ServiceResult<Uuid> {
        let mut project = helpers::load(self.repo, project_id).await?;
        let request_id = project.apply(solver_id, draft, chrono::Utc::now())?;
        helpers::persist(self.repo, &project).await?;
        tracing::info!(project_id = %project.id, solver_id = %solver_id, "proposal_submitted");
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ServiceError;
    use crate::application::test_support::MemoryProjectRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::projects::project::{NewProject, Project};

    #[tokio::test]
    async fn second_application_is_refused() {
        let repo = MemoryProjectRepository::default();
        let project = Project::new(
            Uuid::new_v4(),
            NewProject {
                title: "CLI".into(),
                description: "Port a CLI".into(),
                ..Default::default()
            },
            chrono::Utc::now(),
        )
        .unwrap();
        repo.insert(&project).await.unwrap();

        let uc = ApplyToProject { repo: &repo };
        let solver = Uuid::new_v4();
        uc.execute(solver, project.id, ProposalDraft::default())
            .await
            .unwrap();
        let err = uc
            .execute(solver, project.id, ProposalDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
        let stored = repo.get_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(stored.requests.len(), 1);

        assert!(matches!(
            uc.execute(solver, Uuid::new_v4(), ProposalDraft::default())
                .await,
            Err(ServiceError::Domain(DomainError::NotFound("Project")))
        ));
    }
}
