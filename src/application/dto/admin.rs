use crate::domain::projects::project::Project;
use crate::domain::users::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsDto {
    pub total_users: i64,
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
}

#[derive(Debug, Clone)]
pub enum SearchResultsDto {
    Projects(Vec<Project>),
    Users(Vec<User>),
    Empty,
}
