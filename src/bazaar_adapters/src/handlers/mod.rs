//! Framework-agnostic storefront handlers.
//!
//! Each handler runs one use case and renders its result through an
//! [`AuthResponseBuilder`](bazaar_core::AuthResponseBuilder). Framework routes
//! extract and parse the request, call the handler, and return the response
//! or the [`ApiError`](crate::http::error::ApiError).

pub mod admin;
pub mod auth;
pub mod profile;

pub use admin::{
    handle_create_first_admin, handle_create_user, handle_delete_user, handle_demote,
    handle_get_user, handle_list_users, handle_promote, handle_update_user, handle_user_stats,
};
pub use auth::{handle_login, handle_request_password_reset, handle_reset_password, handle_signup};
pub use profile::{handle_get_profile, handle_update_profile};

use serde::Serialize;

use crate::http::error::ApiError;

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::UnexpectedError(e.to_string()))
}
