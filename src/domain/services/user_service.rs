use std::sync::Arc;
use crate::domain::{
    models::user::{User, UserInfo},
    ports::UserRepository,
    services::auth_service::AuthService,
};
use crate::error::AppError;
use tracing::{info, warn};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, auth: Arc<AuthService>) -> Self {
        Self { users, auth }
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation("username and password are required".into()));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(
                "A user with this username already exists. Please choose a different username.".into(),
            ));
        }

        let password_hash = self.auth.hash_password(password)?;
        let created = self.users.create(&User::new(username.to_string(), password_hash)).await?;
        info!("Created user: {}", created.id);
        Ok(created)
    }

    /// Verifies credentials and returns a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self.users.find_by_username(username).await?
            .ok_or_else(|| AppError::NotFound(
                "No user found with this username. Please check your username or sign up.".into(),
            ))?;

        if !self.auth.verify_password(password, &user.password_hash)? {
            warn!("Failed login attempt for user: {}", user.id);
            return Err(AppError::Unauthorized);
        }

        let token = self.auth.issue_token(&user)?;
        info!("User logged in: {}", user.id);
        Ok(token)
    }

    pub async fn get_user_info(&self, id: &str) -> Result<UserInfo, AppError> {
        let user = self.users.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Ok(UserInfo { username: user.username })
    }
}
