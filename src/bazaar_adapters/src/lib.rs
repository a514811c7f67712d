//! Concrete implementations of the storefront ports, plus the
//! framework-agnostic handlers and the API error mapping.

pub mod auth_validation;
pub mod config;
pub mod handlers;
pub mod hashing;
pub mod http;
pub mod persistence;

pub use auth_validation::local_jwt_validator::{
    Claims, JwtAuthConfig, JwtTokenIssuer, LocalJwtValidator, TokenAuthError,
};
pub use hashing::Argon2Hasher;
pub use http::error::{ApiError, ErrorResponse};
pub use persistence::{HashMapUserStore, PostgresUserStore};
