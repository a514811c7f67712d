use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_application::{
    AdminError, LoginError, ProfileError, RequestPasswordResetError, ResetPasswordError,
    SignupError,
};
use bazaar_core::{
    AuthorizationError, PasswordHasherError, TokenIssuerError, UserError, UserStoreError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::local_jwt_validator::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure the storefront API can report, already classified by status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Email or phone already taken
    #[error("{0}")]
    ValidationConflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Login failure. One message whether the email or the password was wrong.
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// A business invariant refused the change
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::ValidationConflict(_)
            | ApiError::InvalidInput(_)
            | ApiError::Conflict(_)
            | ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::Unauthorized | ApiError::Unauthenticated(_) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::UnexpectedError(ref e) => {
                tracing::error!(error = %e, "Unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists(_) => ApiError::ValidationConflict(error.to_string()),
            UserStoreError::UserNotFound => ApiError::NotFound(error.to_string()),
            UserStoreError::LastAdmin | UserStoreError::AdminAlreadyExists => {
                ApiError::Conflict(error.to_string())
            }
            UserStoreError::ProtectedAdmin => ApiError::Forbidden(error.to_string()),
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<PasswordHasherError> for ApiError {
    fn from(error: PasswordHasherError) -> Self {
        match error {
            PasswordHasherError::PasswordMismatch => ApiError::Unauthorized,
            PasswordHasherError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenIssuerError> for ApiError {
    fn from(error: TokenIssuerError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::InvalidToken
            | TokenAuthError::TokenError(_) => ApiError::Unauthenticated(error.to_string()),
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(error: AuthorizationError) -> Self {
        ApiError::Forbidden(error.to_string())
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::UserStoreError(e) => e.into(),
            SignupError::PasswordHasherError(e) => e.into(),
            SignupError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::Unauthorized,
            LoginError::UserStoreError(e) => e.into(),
            LoginError::PasswordHasherError(e) => e.into(),
            LoginError::TokenIssuerError(e) => e.into(),
        }
    }
}

impl From<RequestPasswordResetError> for ApiError {
    fn from(error: RequestPasswordResetError) -> Self {
        match error {
            RequestPasswordResetError::UnknownEmail => ApiError::BadRequest(error.to_string()),
            RequestPasswordResetError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidOrExpiredToken => ApiError::BadRequest(error.to_string()),
            ResetPasswordError::UserStoreError(e) => e.into(),
            ResetPasswordError::PasswordHasherError(e) => e.into(),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserStoreError(e) => e.into(),
            ProfileError::PasswordHasherError(e) => e.into(),
            ProfileError::RoleChangeNotAllowed => ApiError::Forbidden(error.to_string()),
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(error: AdminError) -> Self {
        match error {
            AdminError::UserStoreError(e) => e.into(),
            AdminError::PasswordHasherError(e) => e.into(),
            AdminError::CannotDeleteAdmin
            | AdminError::RoleEscalation
            | AdminError::RoleChangeNotAllowed => ApiError::Forbidden(error.to_string()),
        }
    }
}
