//! Rate-limited credential check

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use super::password::PasswordHasher;
use crate::domain::rate_limit::RateLimitError;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::rate_limit::{AttemptRateLimiter, Clock};

/// Login errors
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Trait for the login front door
#[async_trait]
pub trait LoginServiceTrait: Send + Sync + Debug {
    /// Check credentials and return the signed-in user
    async fn login(&self, username: &str, password: &str) -> Result<User, LoginError>;
}

/// Login service guarding credential checks with an attempt limiter
///
/// Attempts are keyed by username, so throttling one account never affects
/// another.
#[derive(Debug)]
pub struct LoginService<R: UserRepository, H: PasswordHasher, C: Clock> {
    users: Arc<R>,
    hasher: Arc<H>,
    limiter: Arc<AttemptRateLimiter<C>>,
}

impl<R: UserRepository, H: PasswordHasher, C: Clock> LoginService<R, H, C> {
    pub fn new(users: Arc<R>, hasher: Arc<H>, limiter: Arc<AttemptRateLimiter<C>>) -> Self {
        Self {
            users,
            hasher,
            limiter,
        }
    }

    async fn verify(&self, username: &str, password: &str) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.get_by_username(username).await? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }
}

#[async_trait]
impl<R, H, C> LoginServiceTrait for LoginService<R, H, C>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    C: Clock + 'static,
{
    async fn login(&self, username: &str, password: &str) -> Result<User, LoginError> {
        let username = username.trim();

        self.limiter.attempt(username).inspect_err(|e| {
            warn!(username = %username, reason = %e.reason(), retry_after_ms = e.retry_after_ms(), "Login throttled");
        })?;

        let Some(mut user) = self.verify(username, password).await? else {
            self.limiter.record_failure(username);
            warn!(username = %username, "Login failed");
            return Err(LoginError::InvalidCredentials);
        };

        self.limiter.reset(username);

        let now = Utc::now();
        self.users.record_login(user.id(), now).await?;
        user.record_login(now);

        info!(username = %username, role = %user.role(), "Login succeeded");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rate_limit::{LimitReason, RateLimitConfig};
    use crate::domain::user::{MockUserRepository, UserRole};
    use crate::infrastructure::rate_limit::ManualClock;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository};

    type TestLogin = LoginService<InMemoryUserRepository, Argon2Hasher, Arc<ManualClock>>;

    async fn setup(config: RateLimitConfig) -> (TestLogin, Arc<ManualClock>) {
        let hasher = Arc::new(Argon2Hasher::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let hash = hasher.hash("fried-chicken").unwrap();
        users
            .create(User::new("alice", hash, UserRole::Sales))
            .await
            .unwrap();

        let clock = Arc::new(ManualClock::new(0));
        let limiter = Arc::new(AttemptRateLimiter::with_clock(config, clock.clone()));

        (LoginService::new(users, hasher, limiter), clock)
    }

    #[tokio::test]
    async fn test_login_success_records_time() {
        let (service, _) = setup(RateLimitConfig::login()).await;

        let user = service.login("alice", "fried-chicken").await.unwrap();

        assert_eq!(user.username(), "alice");
        assert!(user.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (service, _) = setup(RateLimitConfig::login()).await;

        let result = service.login("alice", "grilled-chicken").await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));

        let result = service.login("nobody", "fried-chicken").await;
        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_second_login_too_soon_is_throttled() {
        let (service, clock) = setup(RateLimitConfig::login()).await;

        assert!(service.login("alice", "grilled-chicken").await.is_err());
        clock.advance(1_000);

        match service.login("alice", "fried-chicken").await {
            Err(LoginError::RateLimited(e)) => {
                assert_eq!(e.reason(), LimitReason::MinimumWait);
                assert_eq!(e.retry_after_ms(), 14_000);
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_resets_limiter() {
        let config = RateLimitConfig::new(1, 60_000).with_min_wait_ms(0);
        let (service, _) = setup(config).await;

        service.login("alice", "fried-chicken").await.unwrap();
        // Window would be full without the reset
        service.login("alice", "fried-chicken").await.unwrap();
    }

    #[tokio::test]
    async fn test_repeated_failures_back_off() {
        let config = RateLimitConfig::new(10, 60_000).with_min_wait_ms(1_000);
        let (service, clock) = setup(config).await;

        assert!(service.login("alice", "wrong-one").await.is_err());
        clock.advance(1_000);
        assert!(service.login("alice", "wrong-two").await.is_err());
        clock.advance(1_000);

        match service.login("alice", "fried-chicken").await {
            Err(LoginError::RateLimited(e)) => assert_eq!(e.reason(), LimitReason::Backoff),
            other => panic!("expected backoff, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_username()
            .returning(|_| Err(DomainError::storage("unavailable")));

        let limiter = Arc::new(AttemptRateLimiter::with_clock(
            RateLimitConfig::login(),
            Arc::new(ManualClock::new(0)),
        ));
        let service = LoginService::new(Arc::new(users), Arc::new(Argon2Hasher::new()), limiter);

        let result = service.login("alice", "fried-chicken").await;
        assert!(matches!(result, Err(LoginError::Domain(DomainError::Storage { .. }))));
    }
}
