//! Storefront HTTP service: the full router with its role-gated groups, CORS
//! and request tracing, plus helpers for wiring Postgres.

pub mod helpers;
pub mod service;
pub mod tracing;

pub use service::StorefrontService;
