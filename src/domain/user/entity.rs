//! User entity and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::UserValidationError;

/// Role of a user in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages items and meal sets
    Admin,
    /// Records sales
    Sales,
    /// Read-only access
    #[default]
    User,
}

impl UserRole {
    pub fn can_manage_inventory(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_record_sales(&self) -> bool {
        matches!(self, Self::Admin | Self::Sales)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Sales => write!(f, "sales"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "sales" => Ok(Self::Sales),
            "user" => Ok(Self::User),
            other => Err(UserValidationError::UnknownRole(other.to_string())),
        }
    }
}

/// User entity for authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    username: String,
    /// Argon2 password hash, never serialized
    #[serde(skip_serializing)]
    password_hash: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    // Mutators

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("Sales".parse::<UserRole>().unwrap(), UserRole::Sales);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_manage_inventory());
        assert!(UserRole::Sales.can_record_sales());
        assert!(!UserRole::Sales.can_manage_inventory());
        assert!(!UserRole::User.can_record_sales());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("alice", "$argon2id$secret", UserRole::Sales);
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"sales\""));
        assert!(!json.contains("last_login_at"));
    }
}
