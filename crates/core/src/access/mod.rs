//! Access policy for the goal and review workflows.
//!
//! Role-based branching is concentrated here as one policy function per
//! operation instead of inline conditionals in the services. Two distinct
//! reviewer-identification rules coexist on purpose: `is_assigned_reviewer`
//! (the `reviewer_id` stamped on a goal at submission) gates the review
//! workflow, while `is_team_manager` (the `manager_id` on the owner's user
//! record) gates team visibility. An employee's manager and their goal
//! reviewer can diverge when `appraiser_id` was used for assignment.

use crate::goals::goals_model::Goal;
use crate::users::{User, UserRole};

/// Outcome of an access-policy check.
///
/// `DenyNotFound` deliberately collapses "does not exist" and "not yours"
/// so callers cannot probe for the existence of other users' goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyNotFound,
    DenyForbidden,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// The goal's stamped reviewer, set when the owner submitted.
pub fn is_assigned_reviewer(actor: &User, goal: &Goal) -> bool {
    goal.reviewer_id.as_deref() == Some(actor.id.as_str())
}

/// The owner's line manager per the directory record.
pub fn is_team_manager(actor: &User, owner: &User) -> bool {
    owner.manager_id.as_deref() == Some(actor.id.as_str())
}

/// Acting on a submitted goal (approve / reject / return).
///
/// Admins may act on any goal; reviewers only on goals assigned to them, and
/// a mismatch reads as not-found. Employees are refused outright.
pub fn review_goal_access(actor: &User, goal: &Goal) -> Decision {
    match actor.role {
        UserRole::Admin => Decision::Allow,
        UserRole::Reviewer => {
            if is_assigned_reviewer(actor, goal) {
                Decision::Allow
            } else {
                Decision::DenyNotFound
            }
        }
        UserRole::Employee => Decision::DenyForbidden,
    }
}

/// Listing the review queue. Only reviewers and admins have one.
pub fn list_for_review_access(actor: &User) -> Decision {
    match actor.role {
        UserRole::Admin | UserRole::Reviewer => Decision::Allow,
        UserRole::Employee => Decision::DenyForbidden,
    }
}

/// Owner-scoped goal access (read, edit, delete, progress).
pub fn owned_goal_access(actor: &User, goal: &Goal) -> Decision {
    if goal.user_id == actor.id {
        Decision::Allow
    } else {
        Decision::DenyNotFound
    }
}

/// Creating a manager review. Checks role only, not assignment: any
/// reviewer/admin may author one regardless of the goal's `reviewer_id`.
pub fn create_manager_review_access(actor: &User) -> Decision {
    match actor.role {
        UserRole::Admin | UserRole::Reviewer => Decision::Allow,
        UserRole::Employee => Decision::DenyForbidden,
    }
}

/// Viewing the self/manager comparison for a goal.
pub fn compare_access(actor: &User, goal: &Goal) -> Decision {
    match actor.role {
        UserRole::Admin => Decision::Allow,
        UserRole::Reviewer => {
            if is_assigned_reviewer(actor, goal) {
                Decision::Allow
            } else {
                Decision::DenyForbidden
            }
        }
        UserRole::Employee => {
            if goal.user_id == actor.id {
                Decision::Allow
            } else {
                Decision::DenyForbidden
            }
        }
    }
}

/// Viewing a single review: authors always, goal owners for employee actors,
/// assigned reviewers for reviewer actors, admins unconditionally.
pub fn view_review_access(actor: &User, review_author_id: &str, goal: &Goal) -> Decision {
    match actor.role {
        UserRole::Admin => Decision::Allow,
        UserRole::Reviewer => {
            if review_author_id == actor.id || is_assigned_reviewer(actor, goal) {
                Decision::Allow
            } else {
                Decision::DenyForbidden
            }
        }
        UserRole::Employee => {
            if review_author_id == actor.id || goal.user_id == actor.id {
                Decision::Allow
            } else {
                Decision::DenyForbidden
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::goals_model::{Goal, GoalStatus};
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn user(id: &str, role: UserRole, manager_id: Option<&str>) -> User {
        User {
            id: id.to_string(),
            employee_id: None,
            name: format!("User {}", id),
            email: format!("{}@example.com", id),
            role,
            department: None,
            manager_id: manager_id.map(str::to_string),
            appraiser_id: None,
            title: None,
            is_active: true,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn goal(owner_id: &str, reviewer_id: Option<&str>) -> Goal {
        Goal {
            id: "g1".to_string(),
            user_id: owner_id.to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            target: "Target".to_string(),
            quarter: None,
            start_date: None,
            end_date: None,
            status: GoalStatus::Submitted,
            comments: None,
            reviewer_id: reviewer_id.map(str::to_string),
            progress: Decimal::ZERO,
            progress_updated_at: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_admin_reviews_any_goal() {
        let admin = user("a1", UserRole::Admin, None);
        let g = goal("e1", Some("r1"));
        assert_eq!(review_goal_access(&admin, &g), Decision::Allow);
    }

    #[test]
    fn test_assigned_reviewer_allowed() {
        let reviewer = user("r1", UserRole::Reviewer, None);
        let g = goal("e1", Some("r1"));
        assert_eq!(review_goal_access(&reviewer, &g), Decision::Allow);
    }

    #[test]
    fn test_unassigned_reviewer_reads_as_not_found() {
        let reviewer = user("r2", UserRole::Reviewer, None);
        let g = goal("e1", Some("r1"));
        assert_eq!(review_goal_access(&reviewer, &g), Decision::DenyNotFound);
    }

    #[test]
    fn test_employee_cannot_review() {
        let employee = user("e1", UserRole::Employee, None);
        let g = goal("e1", Some("r1"));
        assert_eq!(review_goal_access(&employee, &g), Decision::DenyForbidden);
    }

    #[test]
    fn test_owner_scoped_access_hides_foreign_goals() {
        let employee = user("e2", UserRole::Employee, None);
        let g = goal("e1", None);
        assert_eq!(owned_goal_access(&employee, &g), Decision::DenyNotFound);
        let owner = user("e1", UserRole::Employee, None);
        assert_eq!(owned_goal_access(&owner, &g), Decision::Allow);
    }

    #[test]
    fn test_manager_review_creation_checks_role_only() {
        // Deliberately permissive: a reviewer who is not the goal's assigned
        // reviewer may still author a manager review.
        let reviewer = user("r9", UserRole::Reviewer, None);
        assert_eq!(create_manager_review_access(&reviewer), Decision::Allow);
        let employee = user("e1", UserRole::Employee, None);
        assert_eq!(
            create_manager_review_access(&employee),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn test_reviewer_and_manager_predicates_are_independent() {
        let actor = user("m1", UserRole::Reviewer, None);
        let owner = user("e1", UserRole::Employee, Some("m1"));
        // Manager of the owner, but the goal was assigned to the appraiser.
        let g = goal("e1", Some("appraiser-7"));
        assert!(is_team_manager(&actor, &owner));
        assert!(!is_assigned_reviewer(&actor, &g));
    }

    #[test]
    fn test_compare_access_grid() {
        let g = goal("e1", Some("r1"));
        assert_eq!(
            compare_access(&user("a1", UserRole::Admin, None), &g),
            Decision::Allow
        );
        assert_eq!(
            compare_access(&user("r1", UserRole::Reviewer, None), &g),
            Decision::Allow
        );
        assert_eq!(
            compare_access(&user("r2", UserRole::Reviewer, None), &g),
            Decision::DenyForbidden
        );
        assert_eq!(
            compare_access(&user("e1", UserRole::Employee, None), &g),
            Decision::Allow
        );
        assert_eq!(
            compare_access(&user("e2", UserRole::Employee, None), &g),
            Decision::DenyForbidden
        );
    }
}
