use crate::errors::Result;
use crate::users::users_model::{NewUser, User};

/// Trait for user directory repository operations
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn list(&self, active_only: Option<bool>) -> Result<Vec<User>>;
    fn team_member_ids(&self, manager_id: &str) -> Result<Vec<String>>;
    fn create(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user directory service operations
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn list_users(&self, active_only: Option<bool>) -> Result<Vec<User>>;
    fn create_user(&self, new_user: NewUser) -> Result<User>;
}
