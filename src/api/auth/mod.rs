//! Authentication API endpoints
//!
//! Only the rate-limited credential check is exposed; session issuance is
//! handled elsewhere.

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserRole};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            role: user.role(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %request.username, "Login attempt");

    let user = state
        .login_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
