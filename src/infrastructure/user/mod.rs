//! User infrastructure module
//!
//! Argon2 password hashing, the in-memory user store, account management
//! and the rate-limited login check.

mod login;
mod password;
mod repository;
mod service;

pub use login::{LoginError, LoginService, LoginServiceTrait};
pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UserService};
