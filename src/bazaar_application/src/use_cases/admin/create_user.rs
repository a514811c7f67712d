use bazaar_core::{NewUser, PasswordHasher, PublicUser, Role, User, UserStore};

use super::AdminError;
use crate::use_cases::shared::ensure_contact_available;

/// Admin-initiated account creation. New accounts are always customers.
pub struct CreateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> CreateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "CreateUserUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<PublicUser, AdminError> {
        ensure_contact_available(
            self.user_store,
            Some(&new_user.email),
            Some(&new_user.phone),
            None,
        )
        .await?;

        let password_hash = self.hasher.hash(new_user.password).await?;
        let user = User::new(
            new_user.email,
            new_user.phone,
            password_hash,
            Role::Customer,
            new_user.profile,
        );
        let public_user = user.public_view();

        self.user_store.add_user(user).await?;

        Ok(public_user)
    }
}
