pub mod errors;
pub mod projects;
pub mod users;
