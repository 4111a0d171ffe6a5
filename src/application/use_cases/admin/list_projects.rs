use crate::application::dto::projects::ProjectViewDto;
use crate::application::ports::project_repository::{ProjectFilter, ProjectRepository};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::directory;
use crate::domain::projects::project::ProjectStatus;

pub struct ListAllProjects<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub projects: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> ListAllProjects<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(&self, status: Option<ProjectStatus>) -> anyhow::Result<Vec<ProjectViewDto>> {
        let filter = status.map(ProjectFilter::Status).unwrap_or(ProjectFilter::All);
        let rows = self.projects.list(filter).await?;
        directory::populate(self.users, rows).await
    }
}
