// src/models/mod.rs

pub mod attendance;
pub mod upcoming_task;
pub mod workflow;
