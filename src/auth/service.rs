use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::info;

use crate::auth::password::{
    hash_password, is_valid_email, validate_password_strength, verify_password, PasswordError,
    PasswordPolicy,
};
use crate::auth::{
    AuthError, AuthResponse, ChangePasswordRequest, JwtService, LoginRequest, MessageResponse,
    RegisterRequest, UpdateProfileRequest, UserInfo, UserSession, EXPIRY_LEEWAY_SECS,
};
use crate::models::UserAccount;
use crate::repositories::{RepositoryError, UserRepository};

#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    password_policy: PasswordPolicy,
    /// Revoked jti mapped to the token's own expiry (unix seconds).
    revoked_tokens: Arc<RwLock<HashMap<String, usize>>>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt_service", &self.jwt_service)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_service: JwtService, bcrypt_cost: u32) -> Self {
        Self {
            jwt_service,
            users,
            bcrypt_cost,
            password_policy: PasswordPolicy::default(),
            revoked_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        if request.username.trim().is_empty() {
            return Err(AuthError::UsernameValidation("username is required".to_string()));
        }
        if !is_valid_email(&request.email) {
            return Err(AuthError::EmailValidation(request.email));
        }
        self.check_password(&request.password)?;

        if self.users.get(&request.username)?.is_some() {
            return Err(AuthError::UsernameAlreadyExists);
        }
        if self.users.find_by_email(&request.email)?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.hash(request.password).await?;
        let now = Utc::now();
        let account = UserAccount {
            username: request.username,
            email: request.email,
            password_hash,
            profile: request.profile,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(account.clone())?;
        info!(username = %account.username, "Registered user");

        self.auth_response("User registered successfully", account)
    }

    /// Login user
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let account = self
            .users
            .get(&request.username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify(request.password, account.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        self.auth_response("Login successful", account)
    }

    /// Validate a bearer token and make sure it has not been logged out
    pub fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let session = self.jwt_service.extract_user_session(token)?;

        let revoked = self
            .revoked_tokens
            .read()
            .map_err(|_| AuthError::Repository(RepositoryError::LockPoisoned))?;
        if revoked.contains_key(&session.jti) {
            return Err(AuthError::TokenRevoked);
        }

        Ok(session)
    }

    /// Revoke the token used for this session. Entries for tokens that can no
    /// longer validate are dropped on the way.
    pub fn logout(&self, session: &UserSession) -> Result<MessageResponse, AuthError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let mut revoked = self
            .revoked_tokens
            .write()
            .map_err(|_| AuthError::Repository(RepositoryError::LockPoisoned))?;
        revoked.retain(|_, expires_at| *expires_at as u64 + EXPIRY_LEEWAY_SECS >= now);
        revoked.insert(session.jti.clone(), session.expires_at);

        Ok(MessageResponse::new("Logout successful"))
    }

    pub fn get_user(&self, username: &str) -> Result<UserAccount, AuthError> {
        self.users.get(username)?.ok_or(AuthError::UserNotFound)
    }

    /// Update email and/or merge profile fields
    pub fn update_profile(
        &self,
        username: &str,
        request: UpdateProfileRequest,
    ) -> Result<UserInfo, AuthError> {
        let mut account = self.get_user(username)?;

        if let Some(email) = request.email {
            if !is_valid_email(&email) {
                return Err(AuthError::EmailValidation(email));
            }
            account.email = email;
        }
        if let Some(patch) = request.profile {
            patch.apply(&mut account.profile);
        }
        account.updated_at = Utc::now();

        self.users.update(account.clone())?;
        Ok(account.into())
    }

    pub async fn change_password(
        &self,
        username: &str,
        request: ChangePasswordRequest,
    ) -> Result<MessageResponse, AuthError> {
        let mut account = self.get_user(username)?;

        if !self
            .verify(request.current_password, account.password_hash.clone())
            .await?
        {
            return Err(AuthError::CurrentPasswordIncorrect);
        }
        self.check_password(&request.new_password)?;

        account.password_hash = self.hash(request.new_password).await?;
        account.updated_at = Utc::now();
        self.users.update(account)?;

        Ok(MessageResponse::new("Password changed successfully"))
    }

    fn auth_response(&self, message: &str, account: UserAccount) -> Result<AuthResponse, AuthError> {
        let access_token = self.jwt_service.create_access_token(&account.username)?;

        Ok(AuthResponse {
            message: message.to_string(),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: account.into(),
        })
    }

    fn check_password(&self, password: &str) -> Result<(), AuthError> {
        validate_password_strength(password, &self.password_policy)
            .map_err(|err| AuthError::PasswordValidation(err.to_string()))
    }

    async fn hash(&self, password: String) -> Result<String, AuthError> {
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|_| PasswordError::HashingFailed)??;
        Ok(hashed)
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|_| PasswordError::VerificationFailed)??;
        Ok(matches)
    }
}
