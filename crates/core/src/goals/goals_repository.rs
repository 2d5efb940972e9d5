use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbTransactionExecutor};
use crate::errors::Result;
use crate::goals::goals_model::{
    Goal, GoalDB, GoalProgressHistory, GoalProgressHistoryDB, GoalStatus, GoalUpdate, NewGoal,
};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::schema::{goal_progress_history, goals};

pub struct GoalRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl GoalRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        GoalRepository { pool }
    }

    fn load_many(rows: Vec<GoalDB>) -> Vec<Goal> {
        rows.into_iter().map(Goal::from).collect()
    }
}

impl GoalRepositoryTrait for GoalRepository {
    fn insert(&self, owner_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let now = chrono::Utc::now().naive_utc();
        let goal_db = GoalDB {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title: new_goal.title,
            description: new_goal.description,
            target: new_goal.target,
            quarter: new_goal.quarter,
            start_date: new_goal.start_date,
            end_date: new_goal.end_date,
            status: GoalStatus::Draft.as_str().to_string(),
            comments: new_goal.comments,
            reviewer_id: new_goal.reviewer_id,
            progress: Decimal::ZERO.to_string(),
            progress_updated_at: None,
            created_at: now,
            updated_at: now,
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(goals::table)
            .values(&goal_db)
            .execute(&mut conn)?;

        Ok(goal_db.into())
    }

    fn get_by_id(&self, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .find(goal_id)
            .first::<GoalDB>(&mut conn)
            .optional()?;

        Ok(row.map(Goal::from))
    }

    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(owner_id))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn list_by_owner_ids(&self, owner_ids: &[String]) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq_any(owner_ids))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn list_all(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn list_submitted(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::status.eq(GoalStatus::Submitted.as_str()))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn list_submitted_for_reviewer(&self, reviewer_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::reviewer_id.eq(reviewer_id))
            .filter(goals::status.eq(GoalStatus::Submitted.as_str()))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn list_drafts_by_owner(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(owner_id))
            .filter(goals::status.eq(GoalStatus::Draft.as_str()))
            .order(goals::created_at.desc())
            .load::<GoalDB>(&mut conn)?;

        Ok(Self::load_many(rows))
    }

    fn update(&self, goal: Goal) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let mut goal_db: GoalDB = goal.into();
        goal_db.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(goals::table.find(goal_db.id.clone()))
            .set(&goal_db)
            .execute(&mut conn)?;

        Ok(goal_db.into())
    }

    fn update_fields(&self, goal_id: &str, changes: GoalUpdate) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;

        let updated: GoalDB = diesel::update(goals::table.find(goal_id))
            .set((
                goals::title.eq(changes.title),
                goals::description.eq(changes.description),
                goals::target.eq(changes.target),
                goals::quarter.eq(changes.quarter),
                goals::start_date.eq(changes.start_date),
                goals::end_date.eq(changes.end_date),
                goals::comments.eq(changes.comments),
                goals::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result(&mut conn)?;

        Ok(updated.into())
    }

    fn delete(&self, goal_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(goals::table.find(goal_id)).execute(&mut conn)?)
    }

    fn submit_drafts(&self, owner_id: &str, reviewer_id: &str) -> Result<Vec<Goal>> {
        self.pool.execute(|conn| {
            let draft_ids = goals::table
                .filter(goals::user_id.eq(owner_id))
                .filter(goals::status.eq(GoalStatus::Draft.as_str()))
                .select(goals::id)
                .load::<String>(conn)?;

            diesel::update(goals::table.filter(goals::id.eq_any(&draft_ids)))
                .set((
                    goals::status.eq(GoalStatus::Submitted.as_str()),
                    goals::reviewer_id.eq(reviewer_id),
                    goals::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            let rows = goals::table
                .filter(goals::id.eq_any(&draft_ids))
                .load::<GoalDB>(conn)?;

            Ok(Self::load_many(rows))
        })
    }

    fn record_progress(
        &self,
        goal_id: &str,
        recorded_by: &str,
        progress: Decimal,
        comments: Option<String>,
    ) -> Result<Goal> {
        self.pool.execute(|conn| {
            let now = chrono::Utc::now().naive_utc();

            let history_row = GoalProgressHistoryDB {
                id: Uuid::new_v4().to_string(),
                goal_id: goal_id.to_string(),
                user_id: recorded_by.to_string(),
                progress: progress.to_string(),
                comments,
                created_at: now,
            };
            diesel::insert_into(goal_progress_history::table)
                .values(&history_row)
                .execute(conn)?;

            let updated: GoalDB = diesel::update(goals::table.find(goal_id))
                .set((
                    goals::progress.eq(progress.to_string()),
                    goals::progress_updated_at.eq(now),
                    goals::updated_at.eq(now),
                ))
                .get_result(conn)?;

            Ok(updated.into())
        })
    }

    fn progress_history(&self, goal_id: &str) -> Result<Vec<GoalProgressHistory>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goal_progress_history::table
            .filter(goal_progress_history::goal_id.eq(goal_id))
            .order(goal_progress_history::created_at.desc())
            .load::<GoalProgressHistoryDB>(&mut conn)?;

        Ok(rows.into_iter().map(GoalProgressHistory::from).collect())
    }
}
