//! Signup, login and the password reset pair.

use bazaar_application::{
    LoginUseCase, RequestPasswordResetUseCase, ResetPasswordUseCase, SignupUseCase,
};
use bazaar_core::{
    AuthResponseBuilder, AuthResponseHelpers, Email, NewUser, Password, PasswordHasher,
    ResetToken, TokenIssuer, UserStore,
};
use secrecy::ExposeSecret;

use super::to_json;
use crate::http::error::ApiError;

/// Registers a user and answers `201 {token, user}`.
pub async fn handle_signup<U, H, T, B>(
    user_store: &U,
    hasher: &H,
    token_issuer: &T,
    new_user: NewUser,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
    B: AuthResponseBuilder,
{
    let session = SignupUseCase::new(user_store, hasher, token_issuer)
        .execute(new_user)
        .await?;

    Ok(builder.created_json(to_json(&session)?))
}

/// Answers `200 {token, user}` or a uniform `401`.
pub async fn handle_login<U, H, T, B>(
    user_store: &U,
    hasher: &H,
    token_issuer: &T,
    email: Email,
    password: Password,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
    B: AuthResponseBuilder,
{
    let session = LoginUseCase::new(user_store, hasher, token_issuer)
        .execute(email, password)
        .await?;

    Ok(builder.ok_json(to_json(&session)?))
}

/// Returns the raw reset token in the response body. There is no mail
/// delivery, so the caller is the only channel.
pub async fn handle_request_password_reset<U, B>(
    user_store: &U,
    token_ttl: chrono::Duration,
    email: Email,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let token = RequestPasswordResetUseCase::new(user_store, token_ttl)
        .execute(email)
        .await?;

    Ok(builder.ok_json(serde_json::json!({
        "message": "Password reset token generated",
        "resetToken": token.as_ref().expose_secret(),
    })))
}

pub async fn handle_reset_password<U, H, B>(
    user_store: &U,
    hasher: &H,
    token: ResetToken,
    new_password: Password,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    B: AuthResponseBuilder,
{
    ResetPasswordUseCase::new(user_store, hasher)
        .execute(token, new_password)
        .await?;

    Ok(builder.ok_message("Password successfully reset"))
}
