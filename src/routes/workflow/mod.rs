pub mod workflow_handlers;
pub mod workflow_models;
