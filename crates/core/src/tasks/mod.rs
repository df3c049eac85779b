//! Tasks module - the chore state machine and financial pseudo-tasks.

mod tasks_errors;
mod tasks_model;
mod tasks_service;

#[cfg(test)]
mod tasks_service_tests;

pub use tasks_errors::TaskError;
pub use tasks_model::{NewTask, Task, TaskKind, TaskStatus, TaskType};
pub use tasks_service::TaskService;
