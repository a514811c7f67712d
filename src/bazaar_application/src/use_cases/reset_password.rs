use bazaar_core::{
    Password, PasswordHasher, PasswordHasherError, ResetToken, UserStore, UserStoreError,
};
use chrono::Utc;

/// Error types for the password reset use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Completes a password reset with a previously issued token.
pub struct ResetPasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> ResetPasswordUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the password reset use case
    ///
    /// Wrong and expired tokens fail identically. A successful reset consumes
    /// the token. The token check and the consumption are a single store
    /// write.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        // Skip hashing for tokens that are already dead.
        if self
            .user_store
            .find_by_reset_token(&token, Utc::now())
            .await?
            .is_none()
        {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        }

        let password_hash = self.hasher.hash(new_password).await?;
        let Some(user) = self
            .user_store
            .consume_reset_token(&token, Utc::now(), password_hash)
            .await?
        else {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        };

        tracing::info!(user_id = %user.id, "Password reset completed");

        Ok(())
    }
}
