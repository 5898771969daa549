//! User management service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::InstallConfig,
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser},
        PageRequest, Role, User,
    },
    repository::{
        json_file::not_found,
        users::{admin_exists, username_taken},
        Repository,
    },
};

use super::auth::hash_password;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    install: InstallConfig,
}

impl UsersService {
    pub fn new(repository: Repository, install: InstallConfig) -> Self {
        Self { repository, install }
    }

    /// List users, one page at a time
    pub async fn list_users(&self, page: &PageRequest) -> AppResult<(Vec<User>, usize)> {
        self.repository.users.list(page).await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.repository.users.get(id).await
    }

    /// Create a new user with the given role
    pub async fn create_user(&self, request: CreateUser, role: Role) -> AppResult<User> {
        let password = hash_password(&request.password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: request.username,
            password,
            email: Some(request.email),
            role,
            created_at: Some(Utc::now()),
        };

        let created = self
            .repository
            .users
            .modify(|users| {
                if username_taken(users, &user.username, None) {
                    return Err(AppError::Conflict("Username already exists".to_string()));
                }
                users.push(user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!("Created {} account {}", created.role, created.username);
        Ok(created)
    }

    /// Update username, email and/or password of an existing user
    pub async fn update_user(&self, id: &str, request: UpdateUser) -> AppResult<User> {
        let password = request.password.as_deref().map(hash_password).transpose()?;

        self.repository
            .users
            .modify(|users| {
                if let Some(ref username) = request.username {
                    if username_taken(users, username, Some(id)) {
                        return Err(AppError::Conflict("Username already exists".to_string()));
                    }
                }

                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or_else(|| not_found::<User>(id))?;

                if let Some(username) = request.username {
                    user.username = username;
                }
                if let Some(email) = request.email {
                    user.email = Some(email);
                }
                if let Some(password) = password {
                    user.password = password;
                }

                Ok(user.clone())
            })
            .await
    }

    /// Delete a user; administrator accounts cannot be deleted
    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        let removed = self
            .repository
            .users
            .remove_if(id, |user| {
                if user.is_admin() {
                    Err(AppError::Authorization(
                        "Administrator accounts cannot be deleted".to_string(),
                    ))
                } else {
                    Ok(())
                }
            })
            .await?;

        tracing::info!("Deleted user {}", removed.username);
        Ok(())
    }

    /// Seed the default administrator; fails once any admin exists
    pub async fn install(&self) -> AppResult<User> {
        let password = hash_password(&self.install.admin_password)?;

        let admin = User {
            id: Uuid::new_v4().to_string(),
            username: self.install.admin_username.clone(),
            password,
            email: Some(self.install.admin_email.clone()),
            role: Role::Admin,
            created_at: Some(Utc::now()),
        };

        let created = self
            .repository
            .users
            .modify(|users| {
                if admin_exists(users) {
                    return Err(AppError::Conflict(
                        "An administrator already exists".to_string(),
                    ));
                }
                if username_taken(users, &admin.username, None) {
                    return Err(AppError::Conflict(format!(
                        "Username {} is already taken by a regular user",
                        admin.username
                    )));
                }
                users.push(admin.clone());
                Ok(admin)
            })
            .await?;

        tracing::warn!(
            "Default administrator {} created; change its password",
            created.username
        );
        Ok(created)
    }
}
