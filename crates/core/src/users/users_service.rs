use std::sync::Arc;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

/// Service for the user directory.
///
/// The core consumes this as the Identity Directory: reviewer resolution and
/// actor lookup both go through `get_user`.
pub struct UserService<T: UserRepositoryTrait> {
    user_repo: Arc<T>,
}

impl<T: UserRepositoryTrait> UserService<T> {
    pub fn new(user_repo: Arc<T>) -> Self {
        UserService { user_repo }
    }
}

impl<T: UserRepositoryTrait> UserServiceTrait for UserService<T> {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repo.get_by_id(user_id)
    }

    fn list_users(&self, active_only: Option<bool>) -> Result<Vec<User>> {
        self.user_repo.list(active_only)
    }

    fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.user_repo.create(new_user)
    }
}
