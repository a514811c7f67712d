use bazaar_core::{AuthToken, PublicUser};
use serde::Serialize;

/// Token plus redacted user returned by signup and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user: PublicUser,
}
