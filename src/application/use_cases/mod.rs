pub mod admin;
pub mod auth;
pub mod projects;
pub mod proposals;
pub mod tasks;
pub mod users;
