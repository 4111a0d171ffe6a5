pub mod admin;
pub mod projects;
