pub mod profile;
pub mod request_role;
