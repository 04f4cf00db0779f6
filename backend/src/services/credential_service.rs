//! Credential business logic service.
//!
//! Owns the two secrets-bearing operations of the system: password hashing
//! and identity token handling. Built once at startup from `Config` and shared
//! with handlers through an axum `Extension`.

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::utils::jwt::{Claims, JwtUtils};
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct CredentialService {
    jwt_utils: JwtUtils,
    bcrypt_cost: u32,
}

impl CredentialService {
    /// Creates a new CredentialService instance.
    ///
    /// # Arguments
    /// * `config` - Application configuration carrying the signing secret and hashing cost
    pub fn new(config: &Config) -> Self {
        Self {
            jwt_utils: JwtUtils::new(&config.jwt_secret),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Hashes a plain text password on the blocking thread pool.
    pub async fn hash(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))?
    }

    /// Checks a plain text password against a stored hash.
    pub async fn verify(&self, password: &str, password_hash: &str) -> ServiceResult<bool> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Verification task failed: {}", e)))?
    }

    /// Issues a signed token identifying `user_id`.
    pub fn issue_token(&self, user_id: &str) -> ServiceResult<String> {
        self.jwt_utils.generate_token(user_id)
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidToken` for malformed or badly signed tokens
    pub fn verify_token(&self, token: &str) -> ServiceResult<Claims> {
        self.jwt_utils.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::test_config;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let service = CredentialService::new(&test_config());

        let hashed = service.hash("pw123456").await.unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(service.verify("pw123456", &hashed).await.unwrap());
        assert!(!service.verify("pw654321", &hashed).await.unwrap());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let service = CredentialService::new(&test_config());

        let token = service.issue_token("user-42").unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-42");
    }

    #[test]
    fn test_token_from_another_deployment_is_rejected() {
        let mut other = test_config();
        other.jwt_secret = "another-secret".to_string();

        let token = CredentialService::new(&other).issue_token("user-42").unwrap();
        let result = CredentialService::new(&test_config()).verify_token(&token);

        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }
}
