//! User-specific lookups on the users collection

use crate::{error::AppResult, models::User};

use super::JsonCollection;

impl JsonCollection<User> {
    /// Get user by username (exact match, used for authentication)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|user| user.username == username))
    }
}

/// Check whether `username` belongs to any user other than `exclude_id`
pub fn username_taken(users: &[User], username: &str, exclude_id: Option<&str>) -> bool {
    users
        .iter()
        .any(|user| user.username == username && Some(user.id.as_str()) != exclude_id)
}

pub fn admin_exists(users: &[User]) -> bool {
    users.iter().any(User::is_admin)
}
