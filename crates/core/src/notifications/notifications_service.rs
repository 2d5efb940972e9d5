use std::sync::Arc;

use log::error;

use crate::constants::DEFAULT_NOTIFICATION_LIMIT;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::ReviewAction;
use crate::notifications::notifications_model::{
    NewNotification, Notification, NotificationType,
};
use crate::notifications::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait,
};

/// Service for the notification store.
///
/// Doubles as the domain event sink: lifecycle events are materialized into
/// notification rows here, after the triggering transaction has committed.
pub struct NotificationService<N: NotificationRepositoryTrait> {
    notification_repo: Arc<N>,
}

impl<N: NotificationRepositoryTrait> NotificationService<N> {
    pub fn new(notification_repo: Arc<N>) -> Self {
        NotificationService { notification_repo }
    }

    fn notification_for(event: DomainEvent) -> NewNotification {
        match event {
            DomainEvent::GoalSubmitted {
                goal_id,
                goal_title,
                owner_id,
                owner_name,
                reviewer_id,
            } => NewNotification {
                user_id: reviewer_id,
                title: "New Goal Submitted for Review".to_string(),
                message: format!(
                    "{} has submitted goal '{}' for your review.",
                    owner_name, goal_title
                ),
                notification_type: NotificationType::GoalSubmitted,
                goal_id: Some(goal_id),
                sender_id: Some(owner_id),
            },
            DomainEvent::GoalReviewed {
                goal_id,
                goal_title,
                owner_id,
                reviewer_id,
                reviewer_name,
                action,
            } => {
                let (title, verb, notification_type) = match action {
                    ReviewAction::Approve => {
                        ("Goal Approved", "approved", NotificationType::GoalApproved)
                    }
                    ReviewAction::Reject => {
                        ("Goal Rejected", "rejected", NotificationType::GoalRejected)
                    }
                    ReviewAction::Return => (
                        "Goal Returned for Revision",
                        "returned for revision",
                        NotificationType::GoalReturned,
                    ),
                };
                NewNotification {
                    user_id: owner_id,
                    title: title.to_string(),
                    message: format!(
                        "Your goal '{}' has been {} by {}.",
                        goal_title, verb, reviewer_name
                    ),
                    notification_type,
                    goal_id: Some(goal_id),
                    sender_id: Some(reviewer_id),
                }
            }
        }
    }
}

impl<N: NotificationRepositoryTrait> NotificationServiceTrait for NotificationService<N> {
    fn create_notification(&self, new_notification: NewNotification) -> Result<Notification> {
        self.notification_repo.insert(new_notification)
    }

    fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>> {
        let limit = limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
        self.notification_repo
            .list_for_user(user_id, unread_only, limit)
    }

    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Notification> {
        self.notification_repo
            .mark_read(user_id, notification_id)?
            .ok_or_else(|| Error::NotFound("Notification not found".to_string()))
    }

    fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.notification_repo.mark_all_read(user_id)
    }

    fn unread_count(&self, user_id: &str) -> Result<i64> {
        self.notification_repo.unread_count(user_id)
    }
}

impl<N: NotificationRepositoryTrait> DomainEventSink for NotificationService<N> {
    fn emit(&self, event: DomainEvent) {
        // Fire-and-forget: a failed insert must never fail the lifecycle
        // operation that emitted the event.
        if let Err(e) = self
            .notification_repo
            .insert(Self::notification_for(event))
        {
            error!("Failed to create notification: {}", e);
        }
    }
}
