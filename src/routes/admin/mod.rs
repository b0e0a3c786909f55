pub mod admin_handlers;
pub mod admin_models;
pub mod admin_upload;
