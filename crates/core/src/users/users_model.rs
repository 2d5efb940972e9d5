use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Role assigned to a directory user.
///
/// Drives every access decision in the goal and review workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Employee,
    Reviewer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "employee",
            UserRole::Reviewer => "reviewer",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "employee" => Ok(UserRole::Employee),
            "reviewer" => Ok(UserRole::Reviewer),
            "admin" => Ok(UserRole::Admin),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown user role '{}'",
                other
            )))),
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Employee
    }
}

/// Domain model for a directory user.
///
/// Carries the two reviewer-identification fields the workflows depend on:
/// `manager_id` drives team visibility, `appraiser_id` is the submission
/// fallback when no manager is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub employee_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub manager_id: Option<String>,
    pub appraiser_id: Option<String>,
    pub title: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a directory user (seeding and tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub employee_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub department: Option<String>,
    pub manager_id: Option<String>,
    pub appraiser_id: Option<String>,
    pub title: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        Ok(())
    }
}

/// Database model for users
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub employee_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub manager_id: Option<String>,
    pub appraiser_id: Option<String>,
    pub title: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            employee_id: db.employee_id,
            name: db.name,
            email: db.email,
            // Unknown roles in storage degrade to the least privileged
            role: UserRole::from_str(&db.role).unwrap_or_default(),
            department: db.department,
            manager_id: db.manager_id,
            appraiser_id: db.appraiser_id,
            title: db.title,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            employee_id: domain.employee_id,
            name: domain.name,
            email: domain.email,
            role: domain.role.as_str().to_string(),
            department: domain.department,
            manager_id: domain.manager_id,
            appraiser_id: domain.appraiser_id,
            title: domain.title,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
