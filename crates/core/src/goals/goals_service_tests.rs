use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::events::{DomainEvent, MockDomainEventSink};
use crate::goals::goals_model::{
    Goal, GoalProgressHistory, GoalStatus, GoalUpdate, NewGoal, ReviewAction,
};
use crate::goals::goals_service::GoalService;
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::users::{NewUser, User, UserRepositoryTrait, UserRole};

// --- Mock GoalRepository ---

#[derive(Clone, Default)]
struct MockGoalRepository {
    goals: Arc<Mutex<Vec<Goal>>>,
    history: Arc<Mutex<Vec<GoalProgressHistory>>>,
}

impl MockGoalRepository {
    fn new() -> Self {
        Self::default()
    }

    fn add_goal(&self, goal: Goal) {
        self.goals.lock().unwrap().push(goal);
    }

    fn goal(&self, goal_id: &str) -> Option<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
    }

    fn history_rows(&self) -> Vec<GoalProgressHistory> {
        self.history.lock().unwrap().clone()
    }
}

impl GoalRepositoryTrait for MockGoalRepository {
    fn insert(&self, owner_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title: new_goal.title,
            description: new_goal.description,
            target: new_goal.target,
            quarter: new_goal.quarter,
            start_date: new_goal.start_date,
            end_date: new_goal.end_date,
            status: GoalStatus::Draft,
            comments: new_goal.comments,
            reviewer_id: new_goal.reviewer_id,
            progress: Decimal::ZERO,
            progress_updated_at: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Option<Goal>> {
        Ok(self.goal(goal_id))
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == owner_id)
            .cloned()
            .collect())
    }

    fn list_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| owner_ids.contains(&g.user_id))
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.lock().unwrap().clone())
    }

    fn list_submitted(&self) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.status == GoalStatus::Submitted)
            .cloned()
            .collect())
    }

    fn list_submitted_for_reviewer(&self, reviewer_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| {
                g.status == GoalStatus::Submitted
                    && g.reviewer_id.as_deref() == Some(reviewer_id)
            })
            .cloned()
            .collect())
    }

    fn list_drafts_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == owner_id && g.status == GoalStatus::Draft)
            .cloned()
            .collect())
    }

    fn update(&self, goal: Goal) -> Result<Goal> {
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .expect("updating unknown goal");
        *slot = goal.clone();
        Ok(goal)
    }

    fn update_fields(&self, goal_id: &str, changes: GoalUpdate) -> Result<Goal> {
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .expect("updating unknown goal");
        slot.title = changes.title;
        slot.description = changes.description;
        slot.target = changes.target;
        slot.quarter = changes.quarter;
        slot.start_date = changes.start_date;
        slot.end_date = changes.end_date;
        slot.comments = changes.comments;
        Ok(slot.clone())
    }

    fn delete(&self, goal_id: &str) -> Result<usize> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        Ok(before - goals.len())
    }

    fn submit_drafts(&self, owner_id: &str, reviewer_id: &str) -> Result<Vec<Goal>> {
        let mut goals = self.goals.lock().unwrap();
        let mut submitted = Vec::new();
        for goal in goals.iter_mut() {
            if goal.user_id == owner_id && goal.status == GoalStatus::Draft {
                goal.status = GoalStatus::Submitted;
                goal.reviewer_id = Some(reviewer_id.to_string());
                submitted.push(goal.clone());
            }
        }
        Ok(submitted)
    }

    fn record_progress(
        &self,
        goal_id: &str,
        recorded_by: &str,
        progress: Decimal,
        comments: Option<String>,
    ) -> Result<Goal> {
        let now = NaiveDateTime::default();
        self.history.lock().unwrap().push(GoalProgressHistory {
            id: Uuid::new_v4().to_string(),
            goal_id: goal_id.to_string(),
            user_id: recorded_by.to_string(),
            progress,
            comments,
            created_at: now,
        });

        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .expect("recording progress on unknown goal");
        slot.progress = progress;
        slot.progress_updated_at = Some(now);
        Ok(slot.clone())
    }

    fn progress_history(&self, goal_id: &str) -> Result<Vec<GoalProgressHistory>> {
        let mut rows: Vec<GoalProgressHistory> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.goal_id == goal_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}

// --- Mock UserRepository ---

#[derive(Clone, Default)]
struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    fn new() -> Self {
        Self::default()
    }

    fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

impl UserRepositoryTrait for MockUserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("User with id {} not found", user_id)))
    }

    fn list(&self, _active_only: Option<bool>) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn team_member_ids(&self, manager_id: &str) -> Result<Vec<String>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.manager_id.as_deref() == Some(manager_id) && u.role == UserRole::Employee
            })
            .map(|u| u.id.clone())
            .collect())
    }

    fn create(&self, _new_user: NewUser) -> Result<User> {
        unimplemented!()
    }
}

// --- Fixture ---

struct Fixture {
    goal_repo: Arc<MockGoalRepository>,
    user_repo: Arc<MockUserRepository>,
    sink: MockDomainEventSink,
    service: GoalService<MockGoalRepository, MockUserRepository>,
}

fn fixture() -> Fixture {
    let goal_repo = Arc::new(MockGoalRepository::new());
    let user_repo = Arc::new(MockUserRepository::new());
    let sink = MockDomainEventSink::new();
    let service = GoalService::new(
        goal_repo.clone(),
        user_repo.clone(),
        Arc::new(sink.clone()),
    );
    Fixture {
        goal_repo,
        user_repo,
        sink,
        service,
    }
}

fn user(id: &str, role: UserRole, manager_id: Option<&str>, appraiser_id: Option<&str>) -> User {
    User {
        id: id.to_string(),
        employee_id: None,
        name: format!("User {}", id),
        email: format!("{}@example.com", id),
        role,
        department: None,
        manager_id: manager_id.map(str::to_string),
        appraiser_id: appraiser_id.map(str::to_string),
        title: None,
        is_active: true,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

fn draft_goal(id: &str, owner_id: &str) -> Goal {
    Goal {
        id: id.to_string(),
        user_id: owner_id.to_string(),
        title: "Improve Code Quality".to_string(),
        description: "Refactor the hot paths".to_string(),
        target: "Reduce complexity 20%".to_string(),
        quarter: Some("Q1 2024".to_string()),
        start_date: None,
        end_date: None,
        status: GoalStatus::Draft,
        comments: None,
        reviewer_id: None,
        progress: Decimal::ZERO,
        progress_updated_at: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

fn submitted_goal(id: &str, owner_id: &str, reviewer_id: &str) -> Goal {
    let mut goal = draft_goal(id, owner_id);
    goal.status = GoalStatus::Submitted;
    goal.reviewer_id = Some(reviewer_id.to_string());
    goal
}

fn new_goal() -> NewGoal {
    NewGoal {
        title: "Improve Code Quality".to_string(),
        description: "Refactor the hot paths".to_string(),
        target: "Reduce complexity 20%".to_string(),
        quarter: None,
        start_date: None,
        end_date: None,
        comments: None,
        reviewer_id: None,
    }
}

// ==================== Create ====================

#[tokio::test]
async fn test_create_goal_starts_as_draft_with_zero_progress() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);

    let goal = f.service.create_goal(&owner, new_goal()).await.unwrap();

    assert_eq!(goal.status, GoalStatus::Draft);
    assert_eq!(goal.progress, Decimal::ZERO);
    assert_eq!(goal.user_id, "e1");
}

#[tokio::test]
async fn test_create_goal_requires_title_description_target() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);

    for blank_field in ["title", "description", "target"] {
        let mut input = new_goal();
        match blank_field {
            "title" => input.title = "  ".to_string(),
            "description" => input.description = String::new(),
            _ => input.target = String::new(),
        }
        let err = f.service.create_goal(&owner, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "field: {}", blank_field);
    }
    assert!(f.goal_repo.list_all().unwrap().is_empty());
}

// ==================== SubmitAll ====================

#[tokio::test]
async fn test_submit_all_without_drafts_fails() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, Some("m1"), None);
    f.user_repo.add_user(owner.clone());

    let err = f.service.submit_all(&owner).await.unwrap_err();

    assert!(matches!(err, Error::NoDraftGoals));
    assert!(f.sink.is_empty());
}

#[tokio::test]
async fn test_submit_all_without_reviewer_fails_and_changes_nothing() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);
    f.user_repo.add_user(owner.clone());
    f.goal_repo.add_goal(draft_goal("g1", "e1"));
    f.goal_repo.add_goal(draft_goal("g2", "e1"));

    let err = f.service.submit_all(&owner).await.unwrap_err();

    assert!(matches!(err, Error::NoReviewerAssigned));
    assert_eq!(f.goal_repo.goal("g1").unwrap().status, GoalStatus::Draft);
    assert_eq!(f.goal_repo.goal("g2").unwrap().status, GoalStatus::Draft);
    assert!(f.sink.is_empty());
}

#[tokio::test]
async fn test_submit_all_prefers_manager_over_appraiser() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, Some("m1"), Some("a1"));
    f.user_repo.add_user(owner.clone());
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    let count = f.service.submit_all(&owner).await.unwrap();

    assert_eq!(count, 1);
    let goal = f.goal_repo.goal("g1").unwrap();
    assert_eq!(goal.status, GoalStatus::Submitted);
    assert_eq!(goal.reviewer_id.as_deref(), Some("m1"));
}

#[tokio::test]
async fn test_submit_all_falls_back_to_appraiser() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, Some("a1"));
    f.user_repo.add_user(owner.clone());
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    f.service.submit_all(&owner).await.unwrap();

    let goal = f.goal_repo.goal("g1").unwrap();
    assert_eq!(goal.reviewer_id.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_submit_all_emits_one_event_per_goal() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, Some("m1"), None);
    f.user_repo.add_user(owner.clone());
    f.goal_repo.add_goal(draft_goal("g1", "e1"));
    f.goal_repo.add_goal(draft_goal("g2", "e1"));
    // A goal already past draft is not resubmitted
    f.goal_repo.add_goal(submitted_goal("g3", "e1", "m1"));

    let count = f.service.submit_all(&owner).await.unwrap();

    assert_eq!(count, 2);
    let events = f.sink.events();
    assert_eq!(events.len(), 2);
    for event in events {
        match event {
            DomainEvent::GoalSubmitted {
                reviewer_id,
                owner_id,
                ..
            } => {
                assert_eq!(reviewer_id, "m1");
                assert_eq!(owner_id, "e1");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}

// ==================== Review ====================

#[tokio::test]
async fn test_approve_moves_goal_to_approved_and_notifies_owner() {
    let f = fixture();
    let reviewer = user("m1", UserRole::Reviewer, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));

    let goal = f
        .service
        .review_goal(&reviewer, "g1", "approve", None)
        .await
        .unwrap();

    assert_eq!(goal.status, GoalStatus::Approved);
    let events = f.sink.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        DomainEvent::GoalReviewed {
            owner_id, action, ..
        } => {
            assert_eq!(owner_id, "e1");
            assert_eq!(*action, ReviewAction::Approve);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_reject_and_return_transitions() {
    let f = fixture();
    let reviewer = user("m1", UserRole::Reviewer, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));
    f.goal_repo.add_goal(submitted_goal("g2", "e1", "m1"));

    let rejected = f
        .service
        .review_goal(&reviewer, "g1", "reject", None)
        .await
        .unwrap();
    assert_eq!(rejected.status, GoalStatus::Rejected);

    let returned = f
        .service
        .review_goal(&reviewer, "g2", "return", None)
        .await
        .unwrap();
    assert_eq!(returned.status, GoalStatus::Draft);
}

#[tokio::test]
async fn test_review_with_unknown_action_fails() {
    let f = fixture();
    let reviewer = user("m1", UserRole::Reviewer, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));

    let err = f
        .service
        .review_goal(&reviewer, "g1", "escalate", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidAction(_)));
    assert_eq!(f.goal_repo.goal("g1").unwrap().status, GoalStatus::Submitted);
}

#[tokio::test]
async fn test_review_by_unassigned_reviewer_reads_as_not_found() {
    let f = fixture();
    let other_reviewer = user("m2", UserRole::Reviewer, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));

    let err = f
        .service
        .review_goal(&other_reviewer, "g1", "approve", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(f.sink.is_empty());
}

#[tokio::test]
async fn test_review_by_employee_is_forbidden() {
    let f = fixture();
    let employee = user("e1", UserRole::Employee, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));

    let err = f
        .service
        .review_goal(&employee, "g1", "approve", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn test_review_of_draft_goal_reads_as_not_found() {
    let f = fixture();
    let admin = user("a1", UserRole::Admin, None, None);
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    let err = f
        .service
        .review_goal(&admin, "g1", "approve", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_admin_can_review_any_submitted_goal() {
    let f = fixture();
    let admin = user("a1", UserRole::Admin, None, None);
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));

    let goal = f
        .service
        .review_goal(&admin, "g1", "approve", None)
        .await
        .unwrap();

    assert_eq!(goal.status, GoalStatus::Approved);
}

#[tokio::test]
async fn test_review_feedback_is_appended_not_overwritten() {
    let f = fixture();
    let reviewer = user("m1", UserRole::Reviewer, None, None);
    let mut goal = submitted_goal("g1", "e1", "m1");
    goal.comments = Some("Initial plan".to_string());
    f.goal_repo.add_goal(goal);

    let updated = f
        .service
        .review_goal(&reviewer, "g1", "return", Some("Needs metrics".to_string()))
        .await
        .unwrap();

    assert_eq!(
        updated.comments.as_deref(),
        Some("Initial plan\n[Reviewer]: Needs metrics")
    );
}

#[tokio::test]
async fn test_review_empty_feedback_leaves_comments_alone() {
    let f = fixture();
    let reviewer = user("m1", UserRole::Reviewer, None, None);
    let mut goal = submitted_goal("g1", "e1", "m1");
    goal.comments = Some("Initial plan".to_string());
    f.goal_repo.add_goal(goal);

    let updated = f
        .service
        .review_goal(&reviewer, "g1", "approve", Some(String::new()))
        .await
        .unwrap();

    assert_eq!(updated.comments.as_deref(), Some("Initial plan"));
}

// ==================== UpdateProgress ====================

#[tokio::test]
async fn test_update_progress_records_history_and_goal_together() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    let goal = f
        .service
        .update_progress(&owner, "g1", dec!(42.50), Some("Halfway there".to_string()))
        .await
        .unwrap();

    assert_eq!(goal.progress, dec!(42.50));
    assert!(goal.progress_updated_at.is_some());

    let rows = f.goal_repo.history_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].progress, dec!(42.50));
    assert_eq!(rows[0].comments.as_deref(), Some("Halfway there"));
    assert_eq!(rows[0].user_id, "e1");
}

#[tokio::test]
async fn test_update_progress_out_of_range_changes_nothing() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    for bad in [dec!(-0.01), dec!(100.01), dec!(250)] {
        let err = f
            .service
            .update_progress(&owner, "g1", bad, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Range(_)), "value: {}", bad);
    }

    assert_eq!(f.goal_repo.goal("g1").unwrap().progress, Decimal::ZERO);
    assert!(f.goal_repo.history_rows().is_empty());
}

#[tokio::test]
async fn test_update_progress_boundaries_are_inclusive() {
    let f = fixture();
    let owner = user("e1", UserRole::Employee, None, None);
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    f.service
        .update_progress(&owner, "g1", dec!(0), None)
        .await
        .unwrap();
    let goal = f
        .service
        .update_progress(&owner, "g1", dec!(100), None)
        .await
        .unwrap();

    assert_eq!(goal.progress, dec!(100));
    assert_eq!(f.goal_repo.history_rows().len(), 2);
}

#[tokio::test]
async fn test_update_progress_on_foreign_goal_reads_as_not_found() {
    let f = fixture();
    let intruder = user("e2", UserRole::Employee, None, None);
    f.goal_repo.add_goal(draft_goal("g1", "e1"));

    let err = f
        .service
        .update_progress(&intruder, "g1", dec!(50), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

// ==================== Listings ====================

#[test]
fn test_list_for_review_scoping() {
    let f = fixture();
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "m1"));
    f.goal_repo.add_goal(submitted_goal("g2", "e2", "m2"));
    f.goal_repo.add_goal(draft_goal("g3", "e1"));

    let admin = user("a1", UserRole::Admin, None, None);
    assert_eq!(f.service.list_for_review(&admin).unwrap().len(), 2);

    let reviewer = user("m1", UserRole::Reviewer, None, None);
    let queue = f.service.list_for_review(&reviewer).unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, "g1");

    let employee = user("e1", UserRole::Employee, None, None);
    assert!(matches!(
        f.service.list_for_review(&employee).unwrap_err(),
        Error::Forbidden(_)
    ));
}

#[test]
fn test_list_all_goals_team_scope_uses_manager_id() {
    let f = fixture();
    // e1 reports to m1 but their goal was assigned to appraiser a1
    f.user_repo
        .add_user(user("e1", UserRole::Employee, Some("m1"), Some("a1")));
    f.user_repo
        .add_user(user("e2", UserRole::Employee, Some("m2"), None));
    f.goal_repo.add_goal(submitted_goal("g1", "e1", "a1"));
    f.goal_repo.add_goal(submitted_goal("g2", "e2", "m2"));

    let manager = user("m1", UserRole::Reviewer, None, None);
    let team_goals = f.service.list_all_goals(&manager).unwrap();
    assert_eq!(team_goals.len(), 1);
    assert_eq!(team_goals[0].id, "g1");

    // The assigned appraiser is not the team manager and sees nothing here
    let appraiser = user("a1", UserRole::Reviewer, None, None);
    assert!(f.service.list_all_goals(&appraiser).unwrap().is_empty());

    let admin = user("adm", UserRole::Admin, None, None);
    assert_eq!(f.service.list_all_goals(&admin).unwrap().len(), 2);
}

// ==================== Owner CRUD ====================

#[tokio::test]
async fn test_get_and_delete_are_owner_scoped() {
    let f = fixture();
    f.goal_repo.add_goal(draft_goal("g1", "e1"));
    let owner = user("e1", UserRole::Employee, None, None);
    let intruder = user("e2", UserRole::Employee, None, None);

    assert!(f.service.get_goal(&owner, "g1").is_ok());
    assert!(matches!(
        f.service.get_goal(&intruder, "g1").unwrap_err(),
        Error::NotFound(_)
    ));
    assert!(matches!(
        f.service.delete_goal(&intruder, "g1").await.unwrap_err(),
        Error::NotFound(_)
    ));

    f.service.delete_goal(&owner, "g1").await.unwrap();
    assert!(f.goal_repo.goal("g1").is_none());
}

#[tokio::test]
async fn test_update_goal_validates_required_fields() {
    let f = fixture();
    f.goal_repo.add_goal(draft_goal("g1", "e1"));
    let owner = user("e1", UserRole::Employee, None, None);

    let err = f
        .service
        .update_goal(
            &owner,
            "g1",
            GoalUpdate {
                title: String::new(),
                description: "d".to_string(),
                target: "t".to_string(),
                quarter: None,
                start_date: None,
                end_date: None,
                comments: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(f.goal_repo.goal("g1").unwrap().title, "Improve Code Quality");
}
