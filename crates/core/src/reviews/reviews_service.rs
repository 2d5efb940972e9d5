use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::access::{self, Decision};
use crate::constants::RECENT_REVIEWS_COUNT;
use crate::errors::{Error, Result};
use crate::goals::goals_model::Goal;
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::reviews::reviews_model::{
    NewReview, Review, ReviewComparison, ReviewFilters, ReviewSummary, ReviewType, ReviewUpdate,
};
use crate::reviews::reviews_traits::{ReviewRepositoryTrait, ReviewServiceTrait};
use crate::users::{User, UserRole};

const REVIEW_NOT_FOUND: &str = "Review not found";
const GOAL_NOT_FOUND: &str = "Goal not found";
const ACCESS_DENIED: &str = "Access denied";

/// The review engine.
///
/// Creates and compares self-assessments and manager reviews per goal and
/// quarter, cross-checking the goal store for ownership and assignment facts.
pub struct ReviewService<R: ReviewRepositoryTrait, G: GoalRepositoryTrait> {
    review_repo: Arc<R>,
    goal_repo: Arc<G>,
}

impl<R: ReviewRepositoryTrait, G: GoalRepositoryTrait> ReviewService<R, G> {
    pub fn new(review_repo: Arc<R>, goal_repo: Arc<G>) -> Self {
        ReviewService {
            review_repo,
            goal_repo,
        }
    }

    fn goal(&self, goal_id: &str) -> Result<Goal> {
        self.goal_repo
            .get_by_id(goal_id)?
            .ok_or_else(|| Error::NotFound(GOAL_NOT_FOUND.to_string()))
    }

    fn visible_reviews(&self, actor: &User, filters: &ReviewFilters) -> Result<Vec<Review>> {
        match actor.role {
            UserRole::Admin => self.review_repo.list_filtered(filters),
            UserRole::Reviewer => self.review_repo.list_visible_to_reviewer(&actor.id, filters),
            UserRole::Employee => self.review_repo.list_visible_to_employee(&actor.id, filters),
        }
    }
}

#[async_trait]
impl<R, G> ReviewServiceTrait for ReviewService<R, G>
where
    R: ReviewRepositoryTrait,
    G: GoalRepositoryTrait,
{
    async fn create_review(&self, actor: &User, new_review: NewReview) -> Result<Review> {
        new_review.validate()?;

        let goal = self.goal(&new_review.goal_id)?;

        match new_review.review_type {
            ReviewType::SelfAssessment => {
                if goal.user_id != actor.id {
                    return Err(Error::Forbidden(
                        "You can only create self-assessments for your own goals".to_string(),
                    ));
                }
            }
            ReviewType::ManagerReview => {
                // Role check only; the acting reviewer need not be the goal's
                // stamped reviewer_id.
                if !access::create_manager_review_access(actor).is_allowed() {
                    return Err(Error::Forbidden(
                        "Only reviewers and admins can create manager reviews".to_string(),
                    ));
                }
            }
        }

        if self.review_repo.exists(
            &new_review.goal_id,
            &new_review.quarter,
            new_review.review_type,
        )? {
            return Err(Error::DuplicateReview(format!(
                "A {} already exists for this goal and quarter",
                new_review.review_type.as_str()
            )));
        }

        self.review_repo.insert(&actor.id, new_review)
    }

    fn get_review(&self, actor: &User, review_id: &str) -> Result<Review> {
        let review = self
            .review_repo
            .get_by_id(review_id)?
            .ok_or_else(|| Error::NotFound(REVIEW_NOT_FOUND.to_string()))?;

        let goal = self.goal(&review.goal_id)?;
        match access::view_review_access(actor, &review.reviewer_id, &goal) {
            Decision::Allow => Ok(review),
            _ => Err(Error::Forbidden(ACCESS_DENIED.to_string())),
        }
    }

    fn list_reviews(&self, actor: &User, filters: ReviewFilters) -> Result<Vec<Review>> {
        self.visible_reviews(actor, &filters)
    }

    async fn update_review(
        &self,
        actor: &User,
        review_id: &str,
        changes: ReviewUpdate,
    ) -> Result<Review> {
        changes.validate()?;

        let mut review = self
            .review_repo
            .get_by_id(review_id)?
            .ok_or_else(|| Error::NotFound(REVIEW_NOT_FOUND.to_string()))?;

        if review.reviewer_id != actor.id {
            return Err(Error::Forbidden(
                "You can only update your own reviews".to_string(),
            ));
        }

        if let Some(rating) = changes.rating {
            review.rating = rating;
        }
        if let Some(comments) = changes.comments {
            review.comments = Some(comments);
        }
        if let Some(strengths) = changes.strengths {
            review.strengths = Some(strengths);
        }
        if let Some(areas) = changes.areas_for_improvement {
            review.areas_for_improvement = Some(areas);
        }
        review.updated_at = chrono::Utc::now().naive_utc();

        self.review_repo.update(review)
    }

    async fn delete_review(&self, actor: &User, review_id: &str) -> Result<()> {
        let review = self
            .review_repo
            .get_by_id(review_id)?
            .ok_or_else(|| Error::NotFound(REVIEW_NOT_FOUND.to_string()))?;

        if review.reviewer_id != actor.id && actor.role != UserRole::Admin {
            return Err(Error::Forbidden(
                "You can only delete your own reviews".to_string(),
            ));
        }

        self.review_repo.delete(review_id)?;
        Ok(())
    }

    fn compare(
        &self,
        actor: &User,
        goal_id: &str,
        quarter: Option<&str>,
    ) -> Result<Vec<ReviewComparison>> {
        let goal = self.goal(goal_id)?;

        match access::compare_access(actor, &goal) {
            Decision::Allow => {}
            _ => return Err(Error::Forbidden(ACCESS_DENIED.to_string())),
        }

        let reviews = self.review_repo.list_for_goal(goal_id, quarter)?;

        // Group by quarter, preserving first-appearance order
        let mut quarters: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, (Option<Review>, Option<Review>)> = HashMap::new();
        for review in reviews {
            if !grouped.contains_key(&review.quarter) {
                quarters.push(review.quarter.clone());
            }
            let slot = grouped.entry(review.quarter.clone()).or_default();
            match review.review_type {
                ReviewType::SelfAssessment => slot.0 = Some(review),
                ReviewType::ManagerReview => slot.1 = Some(review),
            }
        }

        let comparisons = quarters
            .into_iter()
            .map(|quarter| {
                let (self_assessment, manager_review) =
                    grouped.remove(&quarter).unwrap_or_default();
                let rating_difference = match (&self_assessment, &manager_review) {
                    (Some(sa), Some(mr)) => Some(mr.rating - sa.rating),
                    _ => None,
                };
                ReviewComparison {
                    goal_id: goal.id.clone(),
                    goal_title: goal.title.clone(),
                    quarter,
                    self_assessment,
                    manager_review,
                    rating_difference,
                }
            })
            .collect();

        Ok(comparisons)
    }

    fn summary(&self, actor: &User) -> Result<ReviewSummary> {
        let reviews = self.visible_reviews(actor, &ReviewFilters::default())?;

        if reviews.is_empty() {
            return Ok(ReviewSummary::empty());
        }

        let total = reviews.len();
        let rating_sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        let average = (Decimal::from(rating_sum) / Decimal::from(total as i64))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0);

        let mut reviews_by_type: HashMap<String, usize> = HashMap::new();
        for review in &reviews {
            *reviews_by_type
                .entry(review.review_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        let mut recent = reviews.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_REVIEWS_COUNT);

        Ok(ReviewSummary {
            total_reviews: total,
            average_rating: average,
            reviews_by_type,
            recent_reviews: recent,
        })
    }
}
