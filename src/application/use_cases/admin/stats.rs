use crate::application::dto::admin::StatsDto;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct GetStats<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub projects: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> GetStats<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(&self) -> anyhow::Result<StatsDto> {
        let total_users = self.users.count().await?;
        let counts = self.projects.counts().await?;
        Ok(StatsDto {
            total_users,
            total_projects: counts.total,
            active_projects: counts.assigned,
            completed_projects: counts.completed,
        })
    }
}
