use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::access::{self, Decision};
use crate::constants::REVIEWER_COMMENT_PREFIX;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::goals_model::{
    Goal, GoalProgressHistory, GoalStatus, GoalUpdate, NewGoal, ReviewAction,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::users::{User, UserRepositoryTrait, UserRole};

const NOT_FOUND_OR_NOT_ASSIGNED: &str = "Goal not found or not assigned to you";
const GOAL_NOT_FOUND: &str = "Goal not found";

/// The goal lifecycle engine.
///
/// Enforces the draft -> submitted -> {approved, rejected, returned-to-draft}
/// state machine, reviewer assignment on submission, and the progress
/// tracking invariants. Emits domain events after each committed transition;
/// the caller-supplied sink turns them into notifications.
pub struct GoalService<G: GoalRepositoryTrait, U: UserRepositoryTrait> {
    goal_repo: Arc<G>,
    user_repo: Arc<U>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl<G: GoalRepositoryTrait, U: UserRepositoryTrait> GoalService<G, U> {
    pub fn new(goal_repo: Arc<G>, user_repo: Arc<U>, event_sink: Arc<dyn DomainEventSink>) -> Self {
        GoalService {
            goal_repo,
            user_repo,
            event_sink,
        }
    }

    fn owned_goal(&self, actor: &User, goal_id: &str) -> Result<Goal> {
        let goal = self
            .goal_repo
            .get_by_id(goal_id)?
            .ok_or_else(|| Error::NotFound(GOAL_NOT_FOUND.to_string()))?;

        match access::owned_goal_access(actor, &goal) {
            Decision::Allow => Ok(goal),
            _ => Err(Error::NotFound(GOAL_NOT_FOUND.to_string())),
        }
    }
}

#[async_trait]
impl<G, U> GoalServiceTrait for GoalService<G, U>
where
    G: GoalRepositoryTrait,
    U: UserRepositoryTrait,
{
    async fn create_goal(&self, actor: &User, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        self.goal_repo.insert(&actor.id, new_goal)
    }

    fn get_goal(&self, actor: &User, goal_id: &str) -> Result<Goal> {
        self.owned_goal(actor, goal_id)
    }

    async fn update_goal(&self, actor: &User, goal_id: &str, changes: GoalUpdate) -> Result<Goal> {
        changes.validate()?;
        self.owned_goal(actor, goal_id)?;
        self.goal_repo.update_fields(goal_id, changes)
    }

    async fn delete_goal(&self, actor: &User, goal_id: &str) -> Result<()> {
        self.owned_goal(actor, goal_id)?;
        self.goal_repo.delete(goal_id)?;
        Ok(())
    }

    async fn submit_all(&self, actor: &User) -> Result<usize> {
        let drafts = self.goal_repo.list_drafts_by_owner(&actor.id)?;
        if drafts.is_empty() {
            return Err(Error::NoDraftGoals);
        }

        // Resolve the owner through the directory before deciding assignment;
        // the manager wins over the appraiser when both are set.
        let owner = self.user_repo.get_by_id(&actor.id)?;
        let reviewer_id = owner
            .manager_id
            .clone()
            .or_else(|| owner.appraiser_id.clone())
            .ok_or(Error::NoReviewerAssigned)?;

        let submitted = self.goal_repo.submit_drafts(&owner.id, &reviewer_id)?;
        debug!(
            "Submitted {} draft goal(s) for user {} to reviewer {}",
            submitted.len(),
            owner.id,
            reviewer_id
        );

        let events: Vec<DomainEvent> = submitted
            .iter()
            .filter_map(|goal| {
                goal.reviewer_id.as_ref().map(|reviewer| {
                    DomainEvent::goal_submitted(
                        goal.id.clone(),
                        goal.title.clone(),
                        owner.id.clone(),
                        owner.name.clone(),
                        reviewer.clone(),
                    )
                })
            })
            .collect();
        self.event_sink.emit_batch(events);

        Ok(submitted.len())
    }

    async fn review_goal(
        &self,
        actor: &User,
        goal_id: &str,
        action: &str,
        feedback: Option<String>,
    ) -> Result<Goal> {
        if let Decision::DenyForbidden = access::list_for_review_access(actor) {
            return Err(Error::Forbidden("Not authorized".to_string()));
        }

        let mut goal = self
            .goal_repo
            .get_by_id(goal_id)?
            .filter(|g| g.status == GoalStatus::Submitted)
            .ok_or_else(|| Error::NotFound(NOT_FOUND_OR_NOT_ASSIGNED.to_string()))?;

        match access::review_goal_access(actor, &goal) {
            Decision::Allow => {}
            _ => return Err(Error::NotFound(NOT_FOUND_OR_NOT_ASSIGNED.to_string())),
        }

        let action = ReviewAction::parse(action)?;
        goal.status = action.target_status();

        if let Some(feedback) = feedback.filter(|f| !f.is_empty()) {
            let prior = goal.comments.take().unwrap_or_default();
            goal.comments = Some(format!(
                "{}\n{}: {}",
                prior, REVIEWER_COMMENT_PREFIX, feedback
            ));
        }

        let updated = self.goal_repo.update(goal)?;

        self.event_sink.emit(DomainEvent::goal_reviewed(
            updated.id.clone(),
            updated.title.clone(),
            updated.user_id.clone(),
            actor.id.clone(),
            actor.name.clone(),
            action,
        ));

        Ok(updated)
    }

    async fn update_progress(
        &self,
        actor: &User,
        goal_id: &str,
        progress: Decimal,
        comments: Option<String>,
    ) -> Result<Goal> {
        self.owned_goal(actor, goal_id)?;

        if progress < Decimal::ZERO || progress > Decimal::ONE_HUNDRED {
            return Err(Error::Range(
                "Progress must be between 0 and 100".to_string(),
            ));
        }

        self.goal_repo
            .record_progress(goal_id, &actor.id, progress, comments)
    }

    fn progress_history(&self, actor: &User, goal_id: &str) -> Result<Vec<GoalProgressHistory>> {
        self.owned_goal(actor, goal_id)?;
        self.goal_repo.progress_history(goal_id)
    }

    fn list_goals(&self, actor: &User) -> Result<Vec<Goal>> {
        self.goal_repo.list_by_owner(&actor.id)
    }

    fn list_all_goals(&self, actor: &User) -> Result<Vec<Goal>> {
        match actor.role {
            UserRole::Admin => self.goal_repo.list_all(),
            UserRole::Reviewer => {
                // Team scope runs on manager_id, not on the reviewer_id
                // stamped at submission; the two can diverge.
                let team = self.user_repo.team_member_ids(&actor.id)?;
                self.goal_repo.list_by_owner_ids(&team)
            }
            UserRole::Employee => self.goal_repo.list_by_owner(&actor.id),
        }
    }

    fn list_for_review(&self, actor: &User) -> Result<Vec<Goal>> {
        match access::list_for_review_access(actor) {
            Decision::Allow => {}
            _ => return Err(Error::Forbidden("Not authorized".to_string())),
        }

        match actor.role {
            UserRole::Admin => self.goal_repo.list_submitted(),
            _ => self.goal_repo.list_submitted_for_reviewer(&actor.id),
        }
    }
}
