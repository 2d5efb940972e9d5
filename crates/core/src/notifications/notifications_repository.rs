use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::errors::Result;
use crate::notifications::notifications_model::{
    NewNotification, Notification, NotificationDB,
};
use crate::notifications::notifications_traits::NotificationRepositoryTrait;
use crate::schema::notifications;

pub struct NotificationRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        NotificationRepository { pool }
    }
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
        let notification_db = NotificationDB {
            id: Uuid::new_v4().to_string(),
            user_id: new_notification.user_id,
            title: new_notification.title,
            message: new_notification.message,
            notification_type: new_notification.notification_type.as_str().to_string(),
            is_read: false,
            goal_id: new_notification.goal_id,
            sender_id: new_notification.sender_id,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(notifications::table)
            .values(&notification_db)
            .execute(&mut conn)?;

        Ok(notification_db.into())
    }

    fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }

        let rows = query
            .order(notifications::created_at.desc())
            .limit(limit)
            .load::<NotificationDB>(&mut conn)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<Option<Notification>> {
        let mut conn = get_connection(&self.pool)?;

        let updated = diesel::update(
            notifications::table
                .find(notification_id)
                .filter(notifications::user_id.eq(user_id)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)?;

        if updated == 0 {
            return Ok(None);
        }

        let row = notifications::table
            .find(notification_id)
            .first::<NotificationDB>(&mut conn)?;

        Ok(Some(row.into()))
    }

    fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)?;

        Ok(updated)
    }

    fn unread_count(&self, user_id: &str) -> Result<i64> {
        use diesel::dsl::count_star;

        let mut conn = get_connection(&self.pool)?;
        let count = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .select(count_star())
            .first(&mut conn)?;

        Ok(count)
    }
}
