use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::errors::{Error, Result};
use crate::schema::users;
use crate::users::users_model::{NewUser, User, UserDB, UserRole};
use crate::users::users_traits::UserRepositoryTrait;

/// Repository for the user directory
pub struct UserRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl UserRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        UserRepository { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("User with id {} not found", user_id)))?;

        Ok(user.into())
    }

    fn list(&self, active_only: Option<bool>) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = users::table.into_boxed();
        if let Some(active) = active_only {
            query = query.filter(users::is_active.eq(active));
        }

        let rows = query
            .order(users::name.asc())
            .load::<UserDB>(&mut conn)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    fn team_member_ids(&self, manager_id: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let ids = users::table
            .filter(users::manager_id.eq(manager_id))
            .filter(users::role.eq(UserRole::Employee.as_str()))
            .select(users::id)
            .load::<String>(&mut conn)?;

        Ok(ids)
    }

    fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let mut user_db: UserDB = new_user.into();
        user_db.id = Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(users::table)
            .values(&user_db)
            .execute(&mut conn)?;

        Ok(user_db.into())
    }
}
