//! Authorization stage of the role gate.
//!
//! Authentication (token verification) happens first and yields a
//! [`Principal`]. This module only answers whether that principal's role is
//! in the set a route declared.

use thiserror::Error;

use crate::domain::{role::Role, user_id::UserId};

/// The authenticated caller of a request, with the role currently stored
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

/// Set of roles a route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRoles(&'static [Role]);

impl AllowedRoles {
    pub const ADMIN_ONLY: AllowedRoles = AllowedRoles(&[Role::Admin]);
    pub const ANY: AllowedRoles = AllowedRoles(&[Role::Customer, Role::Admin]);

    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("Insufficient permissions")]
    Forbidden,
}

pub fn authorize(principal: &Principal, allowed: AllowedRoles) -> Result<(), AuthorizationError> {
    if allowed.contains(principal.role) {
        Ok(())
    } else {
        Err(AuthorizationError::Forbidden)
    }
}
