use bazaar_adapters::{JwtAuthConfig, JwtTokenIssuer, LocalJwtValidator};
use bazaar_core::{PasswordHasher, UserStore};

/// Everything the storefront routes share. Stores and hashers are cheap to
/// clone (connection pools or `Arc`s inside).
#[derive(Clone)]
pub struct StorefrontState<U, H> {
    pub user_store: U,
    pub hasher: H,
    pub token_issuer: JwtTokenIssuer,
    pub validator: LocalJwtValidator,
    pub password_reset_ttl: chrono::Duration,
}

impl<U, H> StorefrontState<U, H>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    /// Signing and verification share one JWT configuration.
    pub fn new(
        user_store: U,
        hasher: H,
        jwt_config: JwtAuthConfig,
        password_reset_ttl: chrono::Duration,
    ) -> Self {
        Self {
            user_store,
            hasher,
            token_issuer: JwtTokenIssuer::new(jwt_config.clone()),
            validator: LocalJwtValidator::new(jwt_config),
            password_reset_ttl,
        }
    }
}
