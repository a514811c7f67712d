use bazaar_core::{
    NewUser, PasswordHasher, PasswordHasherError, Role, TokenIssuer, TokenIssuerError, User,
    UserStore, UserStoreError,
};

use super::{session::AuthSession, shared::ensure_contact_available};

/// Error types for signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("{0}")]
    TokenIssuerError(#[from] TokenIssuerError),
}

/// Signup use case - handles customer self-registration
pub struct SignupUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    user_store: &'a U,
    hasher: &'a H,
    token_issuer: &'a T,
}

impl<'a, U, H, T> SignupUseCase<'a, U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(user_store: &'a U, hasher: &'a H, token_issuer: &'a T) -> Self {
        Self {
            user_store,
            hasher,
            token_issuer,
        }
    }

    /// Execute the signup use case
    ///
    /// The very first account in an empty store becomes an admin; every later
    /// signup is a customer. The user count is read before the role is fixed.
    ///
    /// # Returns
    /// A fresh token and the redacted user, or `UserAlreadyExists` when the
    /// email or phone is taken
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<AuthSession, SignupError> {
        ensure_contact_available(
            self.user_store,
            Some(&new_user.email),
            Some(&new_user.phone),
            None,
        )
        .await?;

        let role = if self.user_store.count_users().await? == 0 {
            Role::Admin
        } else {
            Role::Customer
        };

        let password_hash = self.hasher.hash(new_user.password).await?;
        let user = User::new(
            new_user.email,
            new_user.phone,
            password_hash,
            role,
            new_user.profile,
        );
        let public_user = user.public_view();

        self.user_store.add_user(user).await?;

        let token = self.token_issuer.issue(&public_user.id, role)?;
        tracing::info!(user_id = %public_user.id, %role, "User signed up");

        Ok(AuthSession {
            token,
            user: public_user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeHasher, FakeTokenIssuer, MockUserStore, new_user};
    use bazaar_core::DuplicateField;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_first_signup_becomes_admin_and_second_customer() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);

        let first = use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();
        let second = use_case
            .execute(new_user("b@shop.io", "+15550000002"))
            .await
            .unwrap();

        assert_eq!(first.user.role, Role::Admin);
        assert_eq!(second.user.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_signup_issues_token_for_new_user() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);

        let session = use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();

        assert_eq!(
            session.token.as_str(),
            format!("token:{}:admin", session.user.id)
        );
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_raw_password() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);

        let session = use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();

        let stored = user_store.get_user(&session.user.id).await.unwrap();
        assert_eq!(
            stored.password_hash.as_ref().expose_secret(),
            "hashed:correct horse battery"
        );
    }

    #[tokio::test]
    async fn test_signup_result_is_redacted() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);

        let session = use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();

        let json = serde_json::to_value(&session).unwrap();
        let user = json["user"].as_object().unwrap();
        assert!(!user.contains_key("passwordHash"));
        assert!(!user.contains_key("passwordResetToken"));
        assert!(!user.contains_key("passwordResetExpires"));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);
        use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();

        let result = use_case.execute(new_user("a@shop.io", "+15550000002")).await;

        assert!(matches!(
            result,
            Err(SignupError::UserStoreError(UserStoreError::UserAlreadyExists(
                DuplicateField::Email
            )))
        ));
    }

    #[tokio::test]
    async fn test_signup_duplicate_phone() {
        let user_store = MockUserStore::default();
        let use_case = SignupUseCase::new(&user_store, &FakeHasher, &FakeTokenIssuer);
        use_case
            .execute(new_user("a@shop.io", "+15550000001"))
            .await
            .unwrap();

        let result = use_case.execute(new_user("b@shop.io", "+15550000001")).await;

        assert!(matches!(
            result,
            Err(SignupError::UserStoreError(UserStoreError::UserAlreadyExists(
                DuplicateField::Phone
            )))
        ));
    }
}
