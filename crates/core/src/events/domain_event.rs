//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::goals::ReviewAction;

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about goal lifecycle changes. They are
/// dispatched post-commit through a [`DomainEventSink`](super::DomainEventSink);
/// the notification store translates them into notification rows for the
/// affected users.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A draft goal was submitted for review and a reviewer was resolved.
    GoalSubmitted {
        goal_id: String,
        goal_title: String,
        owner_id: String,
        owner_name: String,
        reviewer_id: String,
    },

    /// A submitted goal was acted on by its reviewer.
    GoalReviewed {
        goal_id: String,
        goal_title: String,
        owner_id: String,
        reviewer_id: String,
        reviewer_name: String,
        action: ReviewAction,
    },
}

impl DomainEvent {
    /// Creates a GoalSubmitted event.
    pub fn goal_submitted(
        goal_id: String,
        goal_title: String,
        owner_id: String,
        owner_name: String,
        reviewer_id: String,
    ) -> Self {
        Self::GoalSubmitted {
            goal_id,
            goal_title,
            owner_id,
            owner_name,
            reviewer_id,
        }
    }

    /// Creates a GoalReviewed event.
    pub fn goal_reviewed(
        goal_id: String,
        goal_title: String,
        owner_id: String,
        reviewer_id: String,
        reviewer_name: String,
        action: ReviewAction,
    ) -> Self {
        Self::GoalReviewed {
            goal_id,
            goal_title,
            owner_id,
            reviewer_id,
            reviewer_name,
            action,
        }
    }
}
