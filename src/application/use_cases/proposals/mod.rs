pub mod apply;
pub mod edit_request;
