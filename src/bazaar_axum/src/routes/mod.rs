//! Axum route functions.
//!
//! Routes only extract and parse; the framework-agnostic handlers in
//! `bazaar_adapters` do the rest.

pub mod admin;
pub mod auth;
pub mod profile;
pub mod requests;

pub use admin::{
    create_first_admin, create_user, delete_user, demote, get_user, list_users, promote,
    update_user, user_stats,
};
pub use auth::{login, request_password_reset, reset_password, signup};
pub use profile::{get_profile, update_profile};

/// Liveness check.
pub async fn root() -> &'static str {
    "Bazaar API is running"
}
