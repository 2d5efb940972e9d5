use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::ReviewAction;
use crate::notifications::notifications_model::{
    NewNotification, Notification, NotificationType,
};
use crate::notifications::notifications_service::NotificationService;
use crate::notifications::notifications_traits::{
    NotificationRepositoryTrait, NotificationServiceTrait,
};

// --- Mock NotificationRepository ---

#[derive(Clone, Default)]
struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
    fail_inserts: Arc<Mutex<bool>>,
}

impl MockNotificationRepository {
    fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    fn fail_next_inserts(&self) {
        *self.fail_inserts.lock().unwrap() = true;
    }
}

impl NotificationRepositoryTrait for MockNotificationRepository {
    fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "insert failure injected".to_string(),
            )));
        }
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: new_notification.user_id,
            title: new_notification.title,
            message: new_notification.message,
            notification_type: new_notification.notification_type,
            is_read: false,
            goal_id: new_notification.goal_id,
            sender_id: new_notification.sender_id,
            created_at: NaiveDateTime::default(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Option<Notification>> {
        let mut notifications = self.notifications.lock().unwrap();
        match notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(Some(n.clone()))
            }
            None => Ok(None),
        }
    }

    fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let mut notifications = self.notifications.lock().unwrap();
        let mut marked = 0;
        for n in notifications.iter_mut() {
            if n.user_id == user_id && !n.is_read {
                n.is_read = true;
                marked += 1;
            }
        }
        Ok(marked)
    }

    fn unread_count(&self, user_id: &str) -> Result<i64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }
}

fn fixture() -> (
    Arc<MockNotificationRepository>,
    NotificationService<MockNotificationRepository>,
) {
    let repo = Arc::new(MockNotificationRepository::new());
    let service = NotificationService::new(repo.clone());
    (repo, service)
}

fn submitted_event() -> DomainEvent {
    DomainEvent::goal_submitted(
        "g1".to_string(),
        "Improve Code Quality".to_string(),
        "e1".to_string(),
        "Jane Doe".to_string(),
        "m1".to_string(),
    )
}

fn reviewed_event(action: ReviewAction) -> DomainEvent {
    DomainEvent::goal_reviewed(
        "g1".to_string(),
        "Improve Code Quality".to_string(),
        "e1".to_string(),
        "m1".to_string(),
        "Mark Manager".to_string(),
        action,
    )
}

// ==================== Sink mapping ====================

#[test]
fn test_goal_submitted_event_notifies_the_reviewer() {
    let (repo, service) = fixture();

    service.emit(submitted_event());

    let rows = repo.rows();
    assert_eq!(rows.len(), 1);
    let n = &rows[0];
    assert_eq!(n.user_id, "m1");
    assert_eq!(n.sender_id.as_deref(), Some("e1"));
    assert_eq!(n.goal_id.as_deref(), Some("g1"));
    assert_eq!(n.notification_type, NotificationType::GoalSubmitted);
    assert_eq!(n.title, "New Goal Submitted for Review");
    assert_eq!(
        n.message,
        "Jane Doe has submitted goal 'Improve Code Quality' for your review."
    );
}

#[test]
fn test_goal_reviewed_event_notifies_the_owner_typed_by_action() {
    let (repo, service) = fixture();

    service.emit(reviewed_event(ReviewAction::Approve));
    service.emit(reviewed_event(ReviewAction::Reject));
    service.emit(reviewed_event(ReviewAction::Return));

    let rows = repo.rows();
    assert_eq!(rows.len(), 3);
    for n in &rows {
        assert_eq!(n.user_id, "e1");
        assert_eq!(n.sender_id.as_deref(), Some("m1"));
    }
    assert_eq!(rows[0].notification_type, NotificationType::GoalApproved);
    assert_eq!(rows[0].title, "Goal Approved");
    assert_eq!(
        rows[0].message,
        "Your goal 'Improve Code Quality' has been approved by Mark Manager."
    );
    assert_eq!(rows[1].notification_type, NotificationType::GoalRejected);
    assert_eq!(rows[2].notification_type, NotificationType::GoalReturned);
    assert_eq!(rows[2].title, "Goal Returned for Revision");
}

#[test]
fn test_sink_swallows_insert_failures() {
    let (repo, service) = fixture();
    repo.fail_next_inserts();

    // Must not panic or propagate
    service.emit(submitted_event());
    service.emit_batch(vec![reviewed_event(ReviewAction::Approve)]);

    assert!(repo.rows().is_empty());
}

// ==================== Store operations ====================

#[test]
fn test_list_and_unread_count() {
    let (_repo, service) = fixture();

    service.emit(submitted_event());
    service.emit(reviewed_event(ReviewAction::Approve));

    assert_eq!(service.unread_count("m1").unwrap(), 1);
    assert_eq!(service.unread_count("e1").unwrap(), 1);
    assert_eq!(
        service.list_notifications("m1", false, None).unwrap().len(),
        1
    );
    assert!(service
        .list_notifications("nobody", false, None)
        .unwrap()
        .is_empty());
}

#[test]
fn test_mark_read_is_recipient_scoped() {
    let (repo, service) = fixture();
    service.emit(submitted_event());
    let id = repo.rows()[0].id.clone();

    // Someone else's notification reads as not found
    let err = service.mark_read("e1", &id).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let marked = service.mark_read("m1", &id).unwrap();
    assert!(marked.is_read);
    assert_eq!(service.unread_count("m1").unwrap(), 0);
    assert!(service
        .list_notifications("m1", true, None)
        .unwrap()
        .is_empty());
}

#[test]
fn test_mark_all_read_returns_count() {
    let (_repo, service) = fixture();
    service.emit(reviewed_event(ReviewAction::Approve));
    service.emit(reviewed_event(ReviewAction::Reject));

    assert_eq!(service.mark_all_read("e1").unwrap(), 2);
    assert_eq!(service.mark_all_read("e1").unwrap(), 0);
    assert_eq!(service.unread_count("e1").unwrap(), 0);
}
