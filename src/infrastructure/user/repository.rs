//! In-memory user repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(users.values().find(|u| u.username() == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        if users.values().any(|u| u.username() == user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        if !users.contains_key(&user.id()) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(result)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;
        user.record_login(at);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("alice", "hash", UserRole::Admin))
            .await
            .unwrap();

        let by_name = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id(), user.id());
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("alice", "hash", UserRole::Admin))
            .await
            .unwrap();

        let result = repo.create(User::new("alice", "other", UserRole::User)).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_record_login() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("alice", "hash", UserRole::Sales))
            .await
            .unwrap();
        let now = Utc::now();

        repo.record_login(user.id(), now).await.unwrap();

        let fetched = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(fetched.last_login_at(), Some(now));

        let result = repo.record_login(Uuid::new_v4(), now).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
