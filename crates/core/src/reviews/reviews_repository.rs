use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::errors::Result;
use crate::reviews::reviews_model::{NewReview, Review, ReviewDB, ReviewFilters, ReviewType};
use crate::reviews::reviews_traits::ReviewRepositoryTrait;
use crate::schema::{goals, reviews};

pub struct ReviewRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ReviewRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        ReviewRepository { pool }
    }
}

impl ReviewRepositoryTrait for ReviewRepository {
    fn insert(&self, author_id: &str, new_review: NewReview) -> Result<Review> {
        let now = chrono::Utc::now().naive_utc();
        let review_db = ReviewDB {
            id: Uuid::new_v4().to_string(),
            goal_id: new_review.goal_id,
            reviewer_id: author_id.to_string(),
            review_type: new_review.review_type.as_str().to_string(),
            quarter: new_review.quarter,
            rating: new_review.rating,
            comments: new_review.comments,
            strengths: new_review.strengths,
            areas_for_improvement: new_review.areas_for_improvement,
            created_at: now,
            updated_at: now,
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(reviews::table)
            .values(&review_db)
            .execute(&mut conn)?;

        Ok(review_db.into())
    }

    fn get_by_id(&self, review_id: &str) -> Result<Option<Review>> {
        let mut conn = get_connection(&self.pool)?;
        let row = reviews::table
            .find(review_id)
            .first::<ReviewDB>(&mut conn)
            .optional()?;

        Ok(row.map(Review::from))
    }

    fn exists(&self, goal_id: &str, quarter: &str, review_type: ReviewType) -> Result<bool> {
        use diesel::dsl::count_star;

        let mut conn = get_connection(&self.pool)?;
        let count: i64 = reviews::table
            .filter(reviews::goal_id.eq(goal_id))
            .filter(reviews::quarter.eq(quarter))
            .filter(reviews::review_type.eq(review_type.as_str()))
            .select(count_star())
            .first(&mut conn)?;

        Ok(count > 0)
    }

    fn list_filtered(&self, filters: &ReviewFilters) -> Result<Vec<Review>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = reviews::table.into_boxed();
        if let Some(goal_id) = &filters.goal_id {
            query = query.filter(reviews::goal_id.eq(goal_id));
        }
        if let Some(review_type) = filters.review_type {
            query = query.filter(reviews::review_type.eq(review_type.as_str()));
        }
        if let Some(quarter) = &filters.quarter {
            query = query.filter(reviews::quarter.eq(quarter));
        }

        let rows = query
            .order(reviews::created_at.desc())
            .load::<ReviewDB>(&mut conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn list_visible_to_employee(
        &self,
        user_id: &str,
        filters: &ReviewFilters,
    ) -> Result<Vec<Review>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = reviews::table
            .inner_join(goals::table)
            .filter(
                reviews::reviewer_id
                    .eq(user_id)
                    .or(goals::user_id.eq(user_id)),
            )
            .select(ReviewDB::as_select())
            .into_boxed();

        if let Some(goal_id) = &filters.goal_id {
            query = query.filter(reviews::goal_id.eq(goal_id));
        }
        if let Some(review_type) = filters.review_type {
            query = query.filter(reviews::review_type.eq(review_type.as_str()));
        }
        if let Some(quarter) = &filters.quarter {
            query = query.filter(reviews::quarter.eq(quarter));
        }

        let rows = query
            .order(reviews::created_at.desc())
            .load::<ReviewDB>(&mut conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn list_visible_to_reviewer(
        &self,
        user_id: &str,
        filters: &ReviewFilters,
    ) -> Result<Vec<Review>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = reviews::table
            .inner_join(goals::table)
            .filter(
                reviews::reviewer_id
                    .eq(user_id)
                    .or(goals::reviewer_id.eq(user_id)),
            )
            .select(ReviewDB::as_select())
            .into_boxed();

        if let Some(goal_id) = &filters.goal_id {
            query = query.filter(reviews::goal_id.eq(goal_id));
        }
        if let Some(review_type) = filters.review_type {
            query = query.filter(reviews::review_type.eq(review_type.as_str()));
        }
        if let Some(quarter) = &filters.quarter {
            query = query.filter(reviews::quarter.eq(quarter));
        }

        let rows = query
            .order(reviews::created_at.desc())
            .load::<ReviewDB>(&mut conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn list_for_goal(&self, goal_id: &str, quarter: Option<&str>) -> Result<Vec<Review>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = reviews::table
            .filter(reviews::goal_id.eq(goal_id))
            .into_boxed();
        if let Some(quarter) = quarter {
            query = query.filter(reviews::quarter.eq(quarter));
        }

        let rows = query
            .order(reviews::created_at.asc())
            .load::<ReviewDB>(&mut conn)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn update(&self, review: Review) -> Result<Review> {
        let mut conn = get_connection(&self.pool)?;
        let review_db: ReviewDB = review.into();

        diesel::update(reviews::table.find(review_db.id.clone()))
            .set(&review_db)
            .execute(&mut conn)?;

        Ok(review_db.into())
    }

    fn delete(&self, review_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(reviews::table.find(review_id)).execute(&mut conn)?)
    }
}
