//! Axum integration for the storefront.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  bazaar_adapters: handlers + ApiError    │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  bazaar_axum                             │
//! │  - AxumResponseBuilder                   │
//! │  - StorefrontState shared by every route │
//! │  - role gate middleware                  │
//! │  - Axum route functions                  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use bazaar_axum::{RoleGate, require_roles, routes};
//! use bazaar_core::AllowedRoles;
//!
//! let admin = Router::new()
//!     .route("/admin/stats", get(routes::user_stats::<U, H>))
//!     .route_layer(middleware::from_fn_with_state(
//!         RoleGate::new(state.clone(), AllowedRoles::ADMIN_ONLY),
//!         require_roles::<U, H>,
//!     ))
//!     .with_state(state);
//! ```

pub mod adapters;
pub mod gate;
pub mod routes;
pub mod state;

pub use adapters::{AxumResponseBuilder, response_builder};
pub use gate::{RoleGate, require_roles};
pub use state::StorefrontState;
