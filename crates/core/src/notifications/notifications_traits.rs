use crate::errors::Result;
use crate::notifications::notifications_model::{NewNotification, Notification};

/// Trait for notification repository operations
pub trait NotificationRepositoryTrait: Send + Sync {
    fn insert(&self, new_notification: NewNotification) -> Result<Notification>;
    fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>>;
    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Option<Notification>>;
    fn mark_all_read(&self, user_id: &str) -> Result<usize>;
    fn unread_count(&self, user_id: &str) -> Result<i64>;
}

/// Trait for notification service operations
pub trait NotificationServiceTrait: Send + Sync {
    fn create_notification(&self, new_notification: NewNotification) -> Result<Notification>;
    fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>>;

    /// Marks one of the user's notifications read; absent or foreign ids read
    /// as not found.
    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification>;
    fn mark_all_read(&self, user_id: &str) -> Result<usize>;
    fn unread_count(&self, user_id: &str) -> Result<i64>;
}
