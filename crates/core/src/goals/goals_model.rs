use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle state of a goal.
///
/// `draft` is initial; `approved` and `rejected` are terminal for the
/// submission cycle. A returned goal re-enters `draft`, so no separate
/// variant exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Draft => "draft",
            GoalStatus::Submitted => "submitted",
            GoalStatus::Approved => "approved",
            GoalStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "draft" => Ok(GoalStatus::Draft),
            "submitted" => Ok(GoalStatus::Submitted),
            "approved" => Ok(GoalStatus::Approved),
            "rejected" => Ok(GoalStatus::Rejected),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            )))),
        }
    }
}

/// Action a reviewer takes on a submitted goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
    Return,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::Return => "return",
        }
    }

    /// Parses the wire form; anything unrecognized is an invalid action.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            "return" => Ok(ReviewAction::Return),
            other => Err(Error::InvalidAction(other.to_string())),
        }
    }

    /// The state a submitted goal moves to under this action.
    pub fn target_status(&self) -> GoalStatus {
        match self {
            ReviewAction::Approve => GoalStatus::Approved,
            ReviewAction::Reject => GoalStatus::Rejected,
            ReviewAction::Return => GoalStatus::Draft,
        }
    }
}

/// Domain model for a performance goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: String,
    pub quarter: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub comments: Option<String>,
    pub reviewer_id: Option<String>,
    pub progress: Decimal,
    pub progress_updated_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub target: String,
    pub quarter: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub comments: Option<String>,
    pub reviewer_id: Option<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        if self.target.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "target".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for an owner edit of an existing goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: String,
    pub description: String,
    pub target: String,
    pub quarter: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        if self.target.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "target".to_string(),
            )));
        }
        Ok(())
    }
}

/// One recorded progress update. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressHistory {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub progress: Decimal,
    pub comments: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for a progress update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub progress: Decimal,
    pub comments: Option<String>,
}

/// Database model for goals
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: String,
    pub quarter: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub comments: Option<String>,
    pub reviewer_id: Option<String>,
    pub progress: String,
    pub progress_updated_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for goal_progress_history
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goal_progress_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalProgressHistoryDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub progress: String,
    pub comments: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Parses a stored decimal column, falling back to zero on garbage rather
/// than failing the whole read.
pub(crate) fn parse_stored_decimal(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        warn!("Failed to parse {} value '{}': {}", field_name, value, e);
        Decimal::ZERO
    })
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            target: db.target,
            quarter: db.quarter,
            start_date: db.start_date,
            end_date: db.end_date,
            status: GoalStatus::from_str(&db.status).unwrap_or(GoalStatus::Draft),
            comments: db.comments,
            reviewer_id: db.reviewer_id,
            progress: parse_stored_decimal(&db.progress, "progress"),
            progress_updated_at: db.progress_updated_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            target: domain.target,
            quarter: domain.quarter,
            start_date: domain.start_date,
            end_date: domain.end_date,
            status: domain.status.as_str().to_string(),
            comments: domain.comments,
            reviewer_id: domain.reviewer_id,
            progress: domain.progress.to_string(),
            progress_updated_at: domain.progress_updated_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<GoalProgressHistoryDB> for GoalProgressHistory {
    fn from(db: GoalProgressHistoryDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            progress: parse_stored_decimal(&db.progress, "progress"),
            comments: db.comments,
            created_at: db.created_at,
        }
    }
}
