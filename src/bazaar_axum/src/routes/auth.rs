//! Public account routes: signup, login and password reset.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use bazaar_adapters::{ApiError, handlers};
use bazaar_application::ResetPasswordError;
use bazaar_core::{Email, NewUser, Password, PasswordHasher, ResetToken, UserStore};

use super::requests::{LoginRequest, NewUserRequest, PasswordResetRequest, ResetPasswordRequest};
use crate::{adapters::response_builder, state::StorefrontState};

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<NewUserRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    let new_user = NewUser::try_from(request)?;

    handlers::handle_signup(
        &state.user_store,
        &state.hasher,
        &state.token_issuer,
        new_user,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;

    // A malformed email or password can never match a stored account.
    let email = Email::try_from(request.email).map_err(|_| ApiError::Unauthorized)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::Unauthorized)?;

    handlers::handle_login(
        &state.user_store,
        &state.hasher,
        &state.token_issuer,
        email,
        password,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Request password reset", skip_all)]
pub async fn request_password_reset<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<PasswordResetRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    let email = Email::try_from(request.email)?;

    handlers::handle_request_password_reset(
        &state.user_store,
        state.password_reset_ttl,
        email,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    // A malformed token answers like an unknown one.
    let token = ResetToken::parse(request.token)
        .map_err(|_| ApiError::from(ResetPasswordError::InvalidOrExpiredToken))?;
    let new_password = Password::try_from(request.new_password)?;

    handlers::handle_reset_password(
        &state.user_store,
        &state.hasher,
        token,
        new_password,
        response_builder(),
    )
    .await
}
