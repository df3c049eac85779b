use chrono::Utc;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::state::EconomyState;

use super::notifications_model::{Notification, NotificationKind, TargetRole};

/// Appends one notification record to the shared list.
pub(crate) fn push_notification(
    state: &mut EconomyState,
    kind: NotificationKind,
    message: impl Into<String>,
    target_role: TargetRole,
) {
    state.notifications.push(Notification {
        id: Uuid::new_v4().to_string(),
        kind,
        message: message.into(),
        read: false,
        timestamp: Utc::now(),
        target_role,
    });
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        NotificationService
    }

    /// Notifications visible to the given role (its own plus `All`).
    pub fn notifications_for<'a>(
        &self,
        state: &'a EconomyState,
        role: TargetRole,
    ) -> Vec<&'a Notification> {
        state
            .notifications
            .iter()
            .filter(|n| n.target_role == role || n.target_role == TargetRole::All)
            .collect()
    }

    pub fn mark_read(&self, state: &mut EconomyState, notification_id: &str) -> Result<()> {
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| {
                Error::Unexpected(format!("notification '{}' not found", notification_id))
            })?;
        notification.read = true;
        Ok(())
    }

    /// Drops notifications already marked read.
    pub fn clear_read(&self, state: &mut EconomyState) {
        state.notifications.retain(|n| !n.read);
    }
}
