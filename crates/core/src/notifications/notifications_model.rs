use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of notification delivered to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GoalSubmitted,
    GoalApproved,
    GoalRejected,
    GoalReturned,
    SystemMessage,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::GoalSubmitted => "goal_submitted",
            NotificationType::GoalApproved => "goal_approved",
            NotificationType::GoalRejected => "goal_rejected",
            NotificationType::GoalReturned => "goal_returned",
            NotificationType::SystemMessage => "system_message",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "goal_submitted" => NotificationType::GoalSubmitted,
            "goal_approved" => NotificationType::GoalApproved,
            "goal_rejected" => NotificationType::GoalRejected,
            "goal_returned" => NotificationType::GoalReturned,
            _ => NotificationType::SystemMessage,
        }
    }
}

/// Domain model for a notification.
///
/// Created by the core as a side effect of lifecycle transitions; end users
/// only ever flip `is_read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub goal_id: Option<String>,
    pub sender_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub goal_id: Option<String>,
    pub sender_id: Option<String>,
}

/// Database model for notifications
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub goal_id: Option<String>,
    pub sender_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            message: db.message,
            notification_type: NotificationType::from_str(&db.notification_type),
            is_read: db.is_read,
            goal_id: db.goal_id,
            sender_id: db.sender_id,
            created_at: db.created_at,
        }
    }
}
