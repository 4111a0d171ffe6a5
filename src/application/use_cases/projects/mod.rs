pub mod assign_solver;
pub mod complete_project;
pub mod create_project;
pub mod get_project;
pub(crate) mod helpers;
pub mod list_projects;
pub mod review_task;
