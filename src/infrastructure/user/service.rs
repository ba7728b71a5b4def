//! User service for account management

use std::sync::Arc;

use tracing::{debug, info};

use super::password::PasswordHasher;
use crate::domain::user::{validate_password, validate_username, User, UserRepository, UserRole};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

/// User service for account management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user with a hashed password
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let username = request.username.trim();

        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.get_by_username(username).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        info!(username = %username, role = %request.role, "Creating user");

        self.repository
            .create(User::new(username, password_hash, request.role))
            .await
    }

    /// Create any configured users that do not exist yet
    ///
    /// Returns how many users were created.
    pub async fn seed(&self, requests: Vec<CreateUserRequest>) -> Result<usize, DomainError> {
        let mut created = 0;

        for request in requests {
            if self
                .repository
                .get_by_username(request.username.trim())
                .await?
                .is_some()
            {
                debug!(username = %request.username, "User already exists, skipping seed");
                continue;
            }

            let username = request.username.clone();
            self.create(request).await.map_err(|e| match e {
                DomainError::Validation { message } => DomainError::configuration(format!(
                    "Seed user '{}' is invalid: {}",
                    username, message
                )),
                other => other,
            })?;
            created += 1;
        }

        Ok(created)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_username(username).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }
}
