//! User repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entity::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for user persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a user; usernames are unique
    async fn create(&self, user: User) -> Result<User, DomainError>;

    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// All users ordered by username
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Stamp the last login time
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;
}
