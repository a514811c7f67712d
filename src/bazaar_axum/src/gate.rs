//! Role gate middleware.
//!
//! Runs in two stages before any route logic:
//!
//! 1. Authentication: the bearer token must be present, well formed, signed
//!    with our secret and unexpired, and name a user that still exists.
//!    Anything else is `401`.
//! 2. Authorization: the user's stored role must be in the route group's
//!    [`AllowedRoles`]. Otherwise `403`.
//!
//! A request that passes carries its [`Principal`] as a request extension.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bazaar_adapters::ApiError;
use bazaar_core::{
    AllowedRoles, AuthValidator, PasswordHasher, Principal, UserStore, UserStoreError, authorize,
};

use crate::state::StorefrontState;

/// Middleware state: the shared storefront state plus the roles a route group
/// accepts.
#[derive(Clone)]
pub struct RoleGate<U, H> {
    state: StorefrontState<U, H>,
    allowed: AllowedRoles,
}

impl<U, H> RoleGate<U, H> {
    pub fn new(state: StorefrontState<U, H>, allowed: AllowedRoles) -> Self {
        Self { state, allowed }
    }
}

#[tracing::instrument(name = "Role gate", skip_all)]
pub async fn require_roles<U, H>(
    State(gate): State<RoleGate<U, H>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let (parts, body) = request.into_parts();

    let claims = gate.state.validator.validate(&parts).await?;
    let user_id = claims.user_id()?;

    // The stored role wins over the role in the token.
    let user = match gate.state.user_store.get_user(&user_id).await {
        Ok(user) => user,
        Err(UserStoreError::UserNotFound) => {
            return Err(ApiError::Unauthenticated("Unknown user".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let principal = Principal {
        user_id,
        role: user.role,
    };
    authorize(&principal, gate.allowed)?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
