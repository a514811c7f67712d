use thiserror::Error;

/// Validation failures raised while parsing user input into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password: must be at least 8 characters")]
    InvalidPassword,
    #[error("Invalid phone number")]
    InvalidPhone,
    #[error("Invalid user id")]
    InvalidUserId,
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error("Invalid reset token")]
    InvalidResetToken,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}
