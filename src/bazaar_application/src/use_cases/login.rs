use bazaar_core::{
    Email, Password, PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError,
    UserStore, UserStoreError,
};

use super::session::AuthSession;

/// Error types specific to login use case
///
/// Unknown email and wrong password both surface as `InvalidCredentials`
/// so the response never reveals whether an account exists.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(PasswordHasherError),
    #[error("{0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

impl From<PasswordHasherError> for LoginError {
    fn from(error: PasswordHasherError) -> Self {
        match error {
            PasswordHasherError::PasswordMismatch => LoginError::InvalidCredentials,
            other => LoginError::PasswordHasherError(other),
        }
    }
}

/// Login use case - handles user authentication
pub struct LoginUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    user_store: &'a U,
    hasher: &'a H,
    token_issuer: &'a T,
}

impl<'a, U, H, T> LoginUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(user_store: &'a U, hasher: &'a H, token_issuer: &'a T) -> Self {
        Self {
            user_store,
            hasher,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// A fresh token and the redacted user
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<AuthSession, LoginError> {
        let Some(user) = self.user_store.find_by_email(&email).await? else {
            return Err(LoginError::InvalidCredentials);
        };

        self.hasher
            .verify(password, user.password_hash.clone())
            .await?;

        let token = self.token_issuer.issue(&user.id, user.role)?;

        Ok(AuthSession {
            token,
            user: user.public_view(),
        })
    }
}
