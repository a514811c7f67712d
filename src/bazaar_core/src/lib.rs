pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    auth_token::AuthToken,
    email::Email,
    password::{Password, PasswordHash},
    phone::Phone,
    reset_token::ResetToken,
    role::Role,
    user::{NewUser, PasswordReset, Profile, PublicUser, User, UserChanges, UserPatch},
    user_error::UserError,
    user_id::UserId,
};

pub use ports::{
    repositories::{DuplicateField, UserStore, UserStoreError},
    services::{PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError},
};

pub use strategies::{
    auth_validator::AuthValidator,
    role_gate::{AllowedRoles, AuthorizationError, Principal, authorize},
};

pub use http_abstraction::{AuthResponseBuilder, AuthResponseHelpers};
