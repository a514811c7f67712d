//! Admin user management.
//!
//! Every use case here assumes the caller already passed the admin role gate,
//! except [`CreateFirstAdminUseCase`], which is open but only works while no
//! admin exists.

mod create_user;
mod delete_user;
mod demote;
mod first_admin;
mod list_users;
mod promote;
mod update_user;
mod user_stats;

pub use create_user::CreateUserUseCase;
pub use delete_user::DeleteUserUseCase;
pub use demote::DemoteFromAdminUseCase;
pub use first_admin::CreateFirstAdminUseCase;
pub use list_users::{GetUserUseCase, ListUsersUseCase};
pub use promote::PromoteToAdminUseCase;
pub use update_user::AdminUpdateUserUseCase;
pub use user_stats::{UserStats, UserStatsUseCase};

use bazaar_core::{PasswordHasherError, UserStoreError};

use super::shared::PatchError;

/// Error types shared by the admin use cases
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Cannot delete an admin user")]
    CannotDeleteAdmin,
    #[error("Cannot set user role to ADMIN through this endpoint")]
    RoleEscalation,
    #[error("Cannot change an admin's role through this endpoint, use demote")]
    RoleChangeNotAllowed,
}

impl From<PatchError> for AdminError {
    fn from(error: PatchError) -> Self {
        match error {
            PatchError::UserStoreError(e) => e.into(),
            PatchError::PasswordHasherError(e) => e.into(),
        }
    }
}
