use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::domain::errors::DomainError;
use crate::domain::projects::project::Project;

pub(crate) async fn load<P: ProjectRepository + ?Sized>(repo: &P, id: Uuid) -> ServiceResult<Project> {
    Ok(repo
        .get_by_id(id)
        .await?
        .ok_or(DomainError::NotFound("Project"))?)
}

pub(crate) async fn persist<P: ProjectRepository + ?Sized>(
    repo: &P,
    project: &Project,
) -> ServiceResult<()> {
    if repo.save(project).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound("Project").into())
    }
}
