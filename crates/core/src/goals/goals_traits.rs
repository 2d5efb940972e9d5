use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalProgressHistory, GoalUpdate, NewGoal};
use crate::users::User;

/// Trait for goal repository operations
pub trait GoalRepositoryTrait: Send + Sync {
    fn insert(&self, owner_id: &str, new_goal: NewGoal) -> Result<Goal>;
    fn get_by_id(&self, goal_id: &str) -> Result<Option<Goal>>;
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn list_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<Goal>>;
    fn list_all(&self) -> Result<Vec<Goal>>;
    fn list_submitted(&self) -> Result<Vec<Goal>>;
    fn list_submitted_for_reviewer(&self, reviewer_id: &str) -> Result<Vec<Goal>>;
    fn list_drafts_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn update(&self, goal: Goal) -> Result<Goal>;
    fn update_fields(&self, goal_id: &str, changes: GoalUpdate) -> Result<Goal>;
    fn delete(&self, goal_id: &str) -> Result<usize>;

    /// Transitions every draft goal of `owner_id` to submitted with the given
    /// reviewer, as one transaction. Returns the goals after the transition.
    fn submit_drafts(&self, owner_id: &str, reviewer_id: &str) -> Result<Vec<Goal>>;

    /// Appends a progress-history row and updates the goal's progress fields
    /// with the same value and timestamp, as one transaction.
    fn record_progress(
        &self,
        goal_id: &str,
        recorded_by: &str,
        progress: Decimal,
        comments: Option<String>,
    ) -> Result<Goal>;

    fn progress_history(&self, goal_id: &str) -> Result<Vec<GoalProgressHistory>>;
}

/// Trait for goal lifecycle service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, actor: &User, new_goal: NewGoal) -> Result<Goal>;
    fn get_goal(&self, actor: &User, goal_id: &str) -> Result<Goal>;
    async fn update_goal(&self, actor: &User, goal_id: &str, changes: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, actor: &User, goal_id: &str) -> Result<()>;

    /// Submits every draft goal owned by the actor. Returns the number of
    /// goals transitioned.
    async fn submit_all(&self, actor: &User) -> Result<usize>;

    /// Applies a reviewer action (approve / reject / return) to a submitted
    /// goal. `action` is the wire form; unknown values are rejected.
    async fn review_goal(
        &self,
        actor: &User,
        goal_id: &str,
        action: &str,
        feedback: Option<String>,
    ) -> Result<Goal>;

    async fn update_progress(
        &self,
        actor: &User,
        goal_id: &str,
        progress: Decimal,
        comments: Option<String>,
    ) -> Result<Goal>;

    fn progress_history(&self, actor: &User, goal_id: &str) -> Result<Vec<GoalProgressHistory>>;

    /// Goals owned by the actor.
    fn list_goals(&self, actor: &User) -> Result<Vec<Goal>>;

    /// Role-scoped listing: admins see everything, reviewers see their team's
    /// goals (by `manager_id`), employees see their own.
    fn list_all_goals(&self, actor: &User) -> Result<Vec<Goal>>;

    /// The review queue: submitted goals visible to the acting reviewer.
    fn list_for_review(&self, actor: &User) -> Result<Vec<Goal>>;
}
