pub mod list_projects;
pub mod list_users;
pub mod review_role_request;
pub mod search;
pub mod stats;
