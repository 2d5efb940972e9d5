use async_trait::async_trait;

use crate::errors::Result;
use crate::reviews::reviews_model::{
    NewReview, Review, ReviewComparison, ReviewFilters, ReviewSummary, ReviewType, ReviewUpdate,
};
use crate::users::User;

/// Trait for review repository operations
pub trait ReviewRepositoryTrait: Send + Sync {
    fn insert(&self, author_id: &str, new_review: NewReview) -> Result<Review>;
    fn get_by_id(&self, review_id: &str) -> Result<Option<Review>>;

    /// Uniqueness probe for the (goal, quarter, type) triple.
    fn exists(&self, goal_id: &str, quarter: &str, review_type: ReviewType) -> Result<bool>;

    /// All reviews matching the filters, newest first. Admin visibility.
    fn list_filtered(&self, filters: &ReviewFilters) -> Result<Vec<Review>>;

    /// Reviews the user authored plus manager reviews of goals they own.
    fn list_visible_to_employee(
        &self,
        user_id: &str,
        filters: &ReviewFilters,
    ) -> Result<Vec<Review>>;

    /// Reviews the user authored plus reviews of goals assigned to them.
    fn list_visible_to_reviewer(
        &self,
        user_id: &str,
        filters: &ReviewFilters,
    ) -> Result<Vec<Review>>;

    fn list_for_goal(&self, goal_id: &str, quarter: Option<&str>) -> Result<Vec<Review>>;
    fn update(&self, review: Review) -> Result<Review>;
    fn delete(&self, review_id: &str) -> Result<usize>;
}

/// Trait for review engine service operations
#[async_trait]
pub trait ReviewServiceTrait: Send + Sync {
    async fn create_review(&self, actor: &User, new_review: NewReview) -> Result<Review>;
    fn get_review(&self, actor: &User, review_id: &str) -> Result<Review>;
    fn list_reviews(&self, actor: &User, filters: ReviewFilters) -> Result<Vec<Review>>;
    async fn update_review(
        &self,
        actor: &User,
        review_id: &str,
        changes: ReviewUpdate,
    ) -> Result<Review>;
    async fn delete_review(&self, actor: &User, review_id: &str) -> Result<()>;

    /// Pairs self-assessment with manager review per quarter for one goal.
    fn compare(
        &self,
        actor: &User,
        goal_id: &str,
        quarter: Option<&str>,
    ) -> Result<Vec<ReviewComparison>>;

    /// Aggregate statistics over the actor's visible reviews. Never errors on
    /// an empty view; returns the zeroed summary instead.
    fn summary(&self, actor: &User) -> Result<ReviewSummary>;
}
