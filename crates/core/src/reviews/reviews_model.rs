use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Kind of evaluation recorded against a goal for a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    SelfAssessment,
    ManagerReview,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::SelfAssessment => "self_assessment",
            ReviewType::ManagerReview => "manager_review",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "self_assessment" => Ok(ReviewType::SelfAssessment),
            "manager_review" => Ok(ReviewType::ManagerReview),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown review type '{}'",
                other
            )))),
        }
    }
}

/// Domain model for one evaluation of a goal in a quarter.
///
/// `reviewer_id` is the author: the goal owner for a self-assessment, the
/// manager for a manager review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub goal_id: String,
    pub reviewer_id: String,
    pub review_type: ReviewType,
    pub quarter: String,
    pub rating: i32,
    pub comments: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub goal_id: String,
    pub review_type: ReviewType,
    pub quarter: String,
    pub rating: i32,
    pub comments: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if self.quarter.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "quarter".to_string(),
            )));
        }
        validate_rating(self.rating)
    }
}

/// Input model for an author edit of an existing review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comments: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
}

impl ReviewUpdate {
    pub fn validate(&self) -> Result<()> {
        match self.rating {
            Some(rating) => validate_rating(rating),
            None => Ok(()),
        }
    }
}

fn validate_rating(rating: i32) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(Error::Range(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Optional filters for listing reviews.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilters {
    pub goal_id: Option<String>,
    pub review_type: Option<ReviewType>,
    pub quarter: Option<String>,
}

/// Self-assessment paired with the manager review for one quarter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewComparison {
    pub goal_id: String,
    pub goal_title: String,
    pub quarter: String,
    pub self_assessment: Option<Review>,
    pub manager_review: Option<Review>,
    /// manager rating minus self rating; present only when both exist.
    pub rating_difference: Option<i32>,
}

/// Aggregate statistics over the reviews visible to an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub total_reviews: usize,
    pub average_rating: f64,
    pub reviews_by_type: HashMap<String, usize>,
    pub recent_reviews: Vec<Review>,
}

impl ReviewSummary {
    /// The zeroed summary returned when nothing is visible.
    pub fn empty() -> Self {
        Self {
            total_reviews: 0,
            average_rating: 0.0,
            reviews_by_type: HashMap::new(),
            recent_reviews: Vec::new(),
        }
    }
}

/// Database model for reviews
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
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewDB {
    pub id: String,
    pub goal_id: String,
    pub reviewer_id: String,
    pub review_type: String,
    pub quarter: String,
    pub rating: i32,
    pub comments: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ReviewDB> for Review {
    fn from(db: ReviewDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            reviewer_id: db.reviewer_id,
            review_type: ReviewType::from_str(&db.review_type)
                .unwrap_or(ReviewType::SelfAssessment),
            quarter: db.quarter,
            rating: db.rating,
            comments: db.comments,
            strengths: db.strengths,
            areas_for_improvement: db.areas_for_improvement,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Review> for ReviewDB {
    fn from(domain: Review) -> Self {
        Self {
            id: domain.id,
            goal_id: domain.goal_id,
            reviewer_id: domain.reviewer_id,
            review_type: domain.review_type.as_str().to_string(),
            quarter: domain.quarter,
            rating: domain.rating,
            comments: domain.comments,
            strengths: domain.strengths,
            areas_for_improvement: domain.areas_for_improvement,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
