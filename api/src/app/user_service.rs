//! User service
//!
//! Handles user registration and lookup.

use std::sync::Arc;

use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    /// Register a new user
    ///
    /// The email pre-check gives a clear conflict message; the repository
    /// re-checks under its own lock when two registrations race.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        let user = User::new(name, email);
        user.validate()?;

        match self.users.get_by_email(&user.email).await {
            Ok(_) => {
                return Err(AppError::Domain(DomainError::Conflict(format!(
                    "User with email '{}' already exists",
                    user.email
                ))))
            }
            Err(DomainError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        self.users.create(&user).await?;
        tracing::info!("Created user {}", user.id);

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &UserId) -> Result<User, AppError> {
        Ok(self.users.get_by_id(id).await?)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.list().await?)
    }
}
