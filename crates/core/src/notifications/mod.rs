//! Notifications module - structured records emitted by mutating commands.

mod notifications_model;
mod notifications_service;

pub use notifications_model::{Notification, NotificationKind, TargetRole};
pub use notifications_service::NotificationService;

pub(crate) use notifications_service::push_notification;
