use bcrypt::{hash, verify};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least {0} characters long")]
    TooShort(usize),
    #[error("Password must be no more than {0} characters long")]
    TooLong(usize),
    #[error("Password must contain at least one number")]
    NoNumber,
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

/// Password strength requirements
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_number: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_number: true,
        }
    }
}

/// Validate password strength according to policy
pub fn validate_password_strength(password: &str, policy: &PasswordPolicy) -> Result<(), PasswordError> {
    let length = password.chars().count();

    if length < policy.min_length {
        return Err(PasswordError::TooShort(policy.min_length));
    }

    if length > policy.max_length {
        return Err(PasswordError::TooLong(policy.max_length));
    }

    if policy.require_number && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::NoNumber);
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    hash(password, cost).map_err(|_| PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(|_| PasswordError::VerificationFailed)
}
