use crate::application::access;
use crate::application::dto::projects::ProjectViewDto;
use crate::application::ports::project_repository::{ProjectFilter, ProjectRepository};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::directory;
use crate::domain::users::user::User;

pub struct ListProjects<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub projects: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> ListProjects<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        viewer: &User,
        filter: ProjectFilter,
    ) -> anyhow::Result<Vec<ProjectViewDto>> {
        let mut rows = self.projects.list(filter).await?;
        for p in rows.iter_mut() {
            access::redact_proposals(viewer, p);
        }
        directory::populate(self.users, rows).await
    }
}
