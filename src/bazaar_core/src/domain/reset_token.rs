use std::fmt::Write;

use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

use super::user_error::UserError;

const RESET_TOKEN_BYTES: usize = 32;

/// Single-use secret authorizing one password change.
///
/// Drawn from a cryptographically secure RNG and hex encoded, so it carries
/// no information derived from the user or any server secret.
#[derive(Debug, Clone)]
pub struct ResetToken(Secret<String>);

impl ResetToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);

        let mut token = String::with_capacity(RESET_TOKEN_BYTES * 2);
        for byte in bytes {
            // Writing to a String cannot fail
            let _ = write!(token, "{byte:02x}");
        }
        Self(Secret::new(token))
    }

    pub fn parse(raw: Secret<String>) -> Result<Self, UserError> {
        if raw.expose_secret().trim().is_empty() {
            return Err(UserError::InvalidResetToken);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for ResetToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for ResetToken {}
