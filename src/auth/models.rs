use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ProfilePatch, UserAccount, UserProfile};

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
    pub jti: String, // JWT ID (for revocation)
}

/// Authentication request models
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub profile: Option<ProfilePatch>,
}

/// Authentication response models
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: usize,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserAccount> for UserInfo {
    fn from(account: UserAccount) -> Self {
        Self {
            username: account.username,
            email: account.email,
            profile: account.profile,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Authenticated caller, inserted into request extensions by the JWT middleware
#[derive(Debug, Clone)]
pub struct UserSession {
    pub username: String,
    pub jti: String,
    pub expires_at: usize,
}

impl UserSession {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            username: claims.sub.clone(),
            jti: claims.jti.clone(),
            expires_at: claims.exp,
        }
    }
}
