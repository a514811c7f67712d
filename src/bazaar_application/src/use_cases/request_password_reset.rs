use bazaar_core::{Email, PasswordReset, ResetToken, UserStore, UserStoreError};
use chrono::{Duration, Utc};

/// Error types for the password reset request use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User not found")]
    UnknownEmail,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Issues a single-use reset token for the account behind an email.
pub struct RequestPasswordResetUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
    token_ttl: Duration,
}

impl<'a, U> RequestPasswordResetUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U, token_ttl: Duration) -> Self {
        Self {
            user_store,
            token_ttl,
        }
    }

    /// Execute the password reset request use case
    ///
    /// Any earlier outstanding token for the user is replaced.
    ///
    /// # Returns
    /// The raw reset token. Delivering it to the user is up to the caller.
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<ResetToken, RequestPasswordResetError> {
        let Some(user) = self.user_store.find_by_email(&email).await? else {
            return Err(RequestPasswordResetError::UnknownEmail);
        };

        let token = ResetToken::generate();
        let reset = PasswordReset {
            token: token.clone(),
            expires_at: Utc::now() + self.token_ttl,
        };
        self.user_store.set_password_reset(&user.id, reset).await?;

        tracing::info!(user_id = %user.id, "Password reset requested");

        Ok(token)
    }
}
