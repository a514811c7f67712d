use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    auth_token::AuthToken,
    password::{Password, PasswordHash},
    role::Role,
    user_id::UserId,
};

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Password does not match")]
    PasswordMismatch,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// One-way, salted, cost-factored password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Returns `PasswordMismatch` when `candidate` does not hash to `expected`.
    async fn verify(
        &self,
        candidate: Password,
        expected: PasswordHash,
    ) -> Result<(), PasswordHasherError>;
}

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Failed to issue token: {0}")]
    SigningFailed(String),
}

/// Signs short-lived bearer tokens bound to a user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<AuthToken, TokenIssuerError>;
}
