pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    admin::{
        AdminError, AdminUpdateUserUseCase, CreateFirstAdminUseCase, CreateUserUseCase,
        DeleteUserUseCase, DemoteFromAdminUseCase, GetUserUseCase, ListUsersUseCase,
        PromoteToAdminUseCase, UserStats, UserStatsUseCase,
    },
    login::{LoginError, LoginUseCase},
    profile::{GetProfileUseCase, ProfileError, UpdateProfileUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    session::AuthSession,
    signup::{SignupError, SignupUseCase},
};
