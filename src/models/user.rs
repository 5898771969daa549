//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::AppError, models::policy::Action};

use super::Record;

/// Coarse permission tag carried by every account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored user record, as persisted in `users.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Argon2 PHC hash
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Absent on records written by early installers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for User {
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public user representation (never exposes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserShort {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserShort {
    fn from(user: User) -> Self {
        UserShort {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Create user request (public registration and admin creation)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub id: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let mut validation = Validation::default();
        validation.leeway = 0;
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with `Forbidden` unless the policy table allows this role
    pub fn require(&self, action: Action) -> Result<(), AppError> {
        if action.permits(self.role) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role '{}' is not allowed to {}",
                self.role,
                action.describe()
            )))
        }
    }

    /// Users may always act on their own record; anyone else needs `action`
    pub fn require_self_or(&self, user_id: &str, action: Action) -> Result<(), AppError> {
        if self.id == user_id {
            Ok(())
        } else {
            self.require(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(role: Role, ttl: Duration) -> UserClaims {
        let now = Utc::now();
        UserClaims {
            id: "42".to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = claims(Role::User, Duration::hours(1)).create_token("secret").unwrap();
        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.id, "42");
        assert_eq!(decoded.role, Role::User);
    }

    #[test]
    fn test_token_wrong_secret() {
        let token = claims(Role::Admin, Duration::hours(1)).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_token_expired() {
        let token = claims(Role::Admin, Duration::minutes(-5)).create_token("secret").unwrap();
        let err = UserClaims::from_token(&token, "secret").unwrap_err();
        assert_eq!(
            err.kind(),
            &jsonwebtoken::errors::ErrorKind::ExpiredSignature
        );
    }

    #[test]
    fn test_stored_user_without_created_at() {
        let raw = r#"{"id":"1","username":"admin","password":"x","role":"admin"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert!(user.is_admin());
        assert!(user.created_at.is_none());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_self_access() {
        let c = claims(Role::User, Duration::hours(1));
        assert!(c.require_self_or("42", Action::ManageUsers).is_ok());
        assert!(c.require_self_or("7", Action::ManageUsers).is_err());
    }
}
