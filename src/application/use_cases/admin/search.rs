use crate::application::dto::admin::SearchResultsDto;
use crate::application::ports::project_repository::ProjectRepository;
use crate::application::ports::user_repository::UserRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Projects,
    Users,
}

impl SearchTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "projects" => Some(SearchTarget::Projects),
            "users" => Some(SearchTarget::Users),
            _ => None,
        }
    }
}

pub struct Search<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub projects: &'a P,
    pub users: &'a U,
}

impl<'a, P, U> Search<'a, P, U>
where
    P: ProjectRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        target: Option<SearchTarget>,
        query: &str,
    ) -> anyhow::Result<SearchResultsDto> {
        let query = query.trim();
        Ok(match target {
            Some(SearchTarget::Projects) => {
                SearchResultsDto::Projects(self.projects.search(query).await?)
            }
            Some(SearchTarget::Users) => SearchResultsDto::Users(self.users.search(query).await?),
            None => SearchResultsDto::Empty,
        })
    }
}
