use argon2::{
    Algorithm, Argon2, Params, PasswordHash as PhcString, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use bazaar_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

/// Argon2id with a fixed cost. Hashing runs on the blocking pool inside the
/// caller's span.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, PasswordHasherError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::new(h.to_string())))
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: Password,
        expected: PasswordHash,
    ) -> Result<(), PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PhcString::new(expected.as_ref().expose_secret())
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;

                argon2()?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                    .map_err(|e| match e {
                        argon2::password_hash::Error::Password => {
                            PasswordHasherError::PasswordMismatch
                        }
                        other => PasswordHasherError::UnexpectedError(other.to_string()),
                    })
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::parse(Secret::new(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_hash_is_salted_phc_string() {
        let hasher = Argon2Hasher::new();

        let first = hasher.hash(password("correct horse battery")).await.unwrap();
        let second = hasher.hash(password("correct horse battery")).await.unwrap();

        assert!(first.as_ref().expose_secret().starts_with("$argon2id$"));
        assert_ne!(
            first.as_ref().expose_secret(),
            second.as_ref().expose_secret()
        );
    }

    #[tokio::test]
    async fn test_verify_accepts_original_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(password("correct horse battery")).await.unwrap();

        let result = hasher.verify(password("correct horse battery"), hash).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_rejects_other_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash(password("correct horse battery")).await.unwrap();

        let result = hasher.verify(password("wrong horse battery"), hash).await;

        assert!(matches!(result, Err(PasswordHasherError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_verify_with_corrupt_hash_is_unexpected() {
        let hasher = Argon2Hasher::new();
        let corrupt = PasswordHash::new(Secret::new("not-a-phc-string".to_string()));

        let result = hasher.verify(password("correct horse battery"), corrupt).await;

        assert!(matches!(
            result,
            Err(PasswordHasherError::UnexpectedError(_))
        ));
    }
}
