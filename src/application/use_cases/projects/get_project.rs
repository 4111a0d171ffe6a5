use uuid::Uuid;

use crate::application::access;
use crate::application::dto::projects::ProjectViewDto;
use crate::application::errors::ServiceResult;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::directory;
use crate::application::use_cases::projects::helpers;
use crate::domain::users::user::User;

pub struct GetProject<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub projects: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> GetProject<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(&self, viewer: &User, id: Uuid) -> ServiceResult<ProjectViewDto> {
        let mut project = helpers::load(self.projects, id).await?;
        access::redact_proposals(viewer, &mut project);
        Ok(directory::populate_one(self.users, project).await?)
    }

    /// Buyer-side detail: only the owner may open it.
    pub async fn execute_owned(&self, viewer: &User, id: Uuid) -> ServiceResult<ProjectViewDto> {
        let project = helpers::load(self.projects, id).await?;
        project.ensure_owner(viewer.id)?;
        Ok(directory::populate_one(self.users, project).await?)
    }
}
