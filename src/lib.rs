//! # Bazaar - Storefront Accounts Library
//!
//! Facade crate re-exporting the public APIs of the storefront account
//! components: signup, login, password reset, role-gated admin user
//! management and the signed-in user's profile.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! bazaar = { path = "../bazaar" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Phone`, `Role`, `User`, etc.
//! - **Ports**: `UserStore`, `PasswordHasher`, `TokenIssuer`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `DemoteFromAdminUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`, `Argon2Hasher`, JWT
//! - **Service**: `StorefrontService`, the assembled Axum router

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use bazaar_core::*;
}

pub use bazaar_core::{
    AllowedRoles, Email, NewUser, Password, Phone, Principal, Profile, PublicUser, ResetToken,
    Role, User, UserChanges, UserError, UserId, UserPatch,
};

// ============================================================================
// Ports
// ============================================================================

pub use bazaar_core::{
    PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use bazaar_application::*;
}

pub use bazaar_application::{
    CreateFirstAdminUseCase, DemoteFromAdminUseCase, LoginUseCase, PromoteToAdminUseCase,
    RequestPasswordResetUseCase, ResetPasswordUseCase, SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic handlers and the API error type
    pub mod http {
        pub use bazaar_adapters::handlers::*;
        pub use bazaar_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use bazaar_adapters::persistence::*;
    }

    /// JWT issuing and validation
    pub mod auth {
        pub use bazaar_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use bazaar_adapters::config::*;
    }
}

pub use bazaar_adapters::{
    Argon2Hasher, HashMapUserStore, JwtAuthConfig, PostgresUserStore, config::Settings,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use bazaar_axum::{RoleGate, StorefrontState, require_roles};
pub use bazaar_service::{
    StorefrontService,
    helpers::{configure_postgresql, get_postgres_pool},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the store and hasher ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
