//! User domain
//!
//! Shop staff accounts and the roles attached to them.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserRole};
pub use repository::UserRepository;
pub use validation::{validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
