//! Authentication service: password hashing, login and token handling

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use thiserror::Error;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{User, UserClaims},
    repository::Repository,
};

/// Why a bearer token was rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token: {0}")]
    Invalid(String),
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Authentication(e.to_string())
    }
}

/// Verify signature and expiry of `token`, yielding the caller's identity
pub fn verify_token(token: &str, secret: &str) -> Result<UserClaims, TokenError> {
    use jsonwebtoken::errors::ErrorKind;

    UserClaims::from_token(token, secret).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored hash; unreadable hashes never match
pub fn verify_password(user: &User, password: &str) -> bool {
    match PasswordHash::new(&user.password) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("User {} has an unreadable password hash", user.id);
            false
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate user by username and password and return a JWT token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&user, password) {
            tracing::info!("Failed login for {}", username);
            return Err(invalid());
        }

        let token = self.issue_token(&user)?;
        tracing::info!("User {} logged in", user.username);
        Ok((token, user))
    }

    /// Create a JWT token for a user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.config.jwt_expiration_hours as i64);

        let claims = UserClaims {
            id: user.id.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<UserClaims, TokenError> {
        verify_token(token, &self.config.jwt_secret)
    }

    /// Token lifetime in seconds
    pub fn expires_in(&self) -> u64 {
        self.config.jwt_expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user_with_password(hash: String) -> User {
        User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password: hash,
            email: None,
            role: Role::User,
            created_at: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let user = user_with_password(hash_password("s3cret").unwrap());
        assert!(user.password.starts_with("$argon2"));
        assert!(verify_password(&user, "s3cret"));
        assert!(!verify_password(&user, "wrong"));
    }

    #[test]
    fn test_plaintext_hash_never_matches() {
        let user = user_with_password("admin123".to_string());
        assert!(!verify_password(&user, "admin123"));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let service = AuthService::new(Repository::new("unused"), AuthConfig::default());
        let user = user_with_password(String::new());
        let token = service.issue_token(&user).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.id, "u1");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            verify_token("not.a.jwt", "secret"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now();
        let claims = UserClaims {
            id: "u1".to_string(),
            role: Role::Admin,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = claims.create_token("secret").unwrap();
        assert_eq!(verify_token(&token, "secret"), Err(TokenError::Expired));
    }
}
