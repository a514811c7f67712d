use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::PasswordHash,
    phone::Phone,
    reset_token::ResetToken,
    role::Role,
    user::{PasswordReset, User, UserChanges},
    user_id::UserId,
};

/// Which unique column a write collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::Email => f.write_str("email"),
            DuplicateField::Phone => f.write_str("phone number"),
        }
    }
}

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User with this {0} already exists")]
    UserAlreadyExists(DuplicateField),
    #[error("User not found")]
    UserNotFound,
    #[error("Cannot demote the last admin user")]
    LastAdmin,
    #[error("Cannot delete an admin user")]
    ProtectedAdmin,
    #[error("Admin user already exists")]
    AdminAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists(a), Self::UserAlreadyExists(b)) => a == b,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::LastAdmin, Self::LastAdmin) => true,
            (Self::ProtectedAdmin, Self::ProtectedAdmin) => true,
            (Self::AdminAlreadyExists, Self::AdminAlreadyExists) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// The credential store.
///
/// Email and phone uniqueness is enforced by the store at write time and
/// reported as `UserAlreadyExists`, whatever pre-checks callers did.
///
/// A user's role is only ever written by `add_user`, `add_first_admin`,
/// `promote` and `demote_admin`. Every other write touches only the columns
/// it names, so concurrent writers never overwrite each other's changes.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;

    /// Inserts `user` as an admin only if no admin exists yet. The check and
    /// the insert are serialized against other bootstrap attempts.
    async fn add_first_admin(&self, user: User) -> Result<(), UserStoreError>;

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserStoreError>;

    /// Finds the user whose stored reset token equals `token` and whose
    /// reset expiry is strictly after `now`.
    async fn find_by_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError>;

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
    async fn count_users(&self) -> Result<u64, UserStoreError>;
    async fn count_by_role(&self, role: Role) -> Result<u64, UserStoreError>;

    /// Writes the `Some` columns of `changes` and returns the stored user.
    /// A new email or phone that belongs to another user is refused with
    /// `UserAlreadyExists`.
    async fn update_user(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError>;

    /// Stores a fresh reset token, replacing any earlier one.
    async fn set_password_reset(
        &self,
        id: &UserId,
        reset: PasswordReset,
    ) -> Result<(), UserStoreError>;

    /// Atomically checks that `token` is stored and still live at `now`,
    /// writes `password_hash` and clears the token. Of several callers racing
    /// on the same token at most one gets `Some`.
    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
        password_hash: PasswordHash,
    ) -> Result<Option<User>, UserStoreError>;

    async fn promote(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Sets the role to customer unless the target is the last remaining
    /// admin, in which case `LastAdmin` is returned and nothing changes.
    async fn demote_admin(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Deletes a non-admin user. Admin rows are refused with `ProtectedAdmin`.
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError>;
}
