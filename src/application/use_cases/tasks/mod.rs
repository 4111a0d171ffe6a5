pub mod create_task;
pub mod delete_task;
pub mod submit_task;
pub mod update_task;
