use bazaar_core::{
    NewUser, PasswordHasher, PublicUser, Role, User, UserStore, UserStoreError,
};

use super::AdminError;
use crate::use_cases::shared::ensure_contact_available;

/// Bootstraps the first admin account on a store that has none.
pub struct CreateFirstAdminUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> CreateFirstAdminUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the first admin bootstrap
    ///
    /// Fails with `AdminAlreadyExists` as soon as any admin exists. The store
    /// re-checks this under its bootstrap lock, so two concurrent calls cannot
    /// both succeed.
    #[tracing::instrument(name = "CreateFirstAdminUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<PublicUser, AdminError> {
        if self.user_store.count_by_role(Role::Admin).await? > 0 {
            return Err(UserStoreError::AdminAlreadyExists.into());
        }

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
            Role::Admin,
            new_user.profile,
        );
        let public_user = user.public_view();

        self.user_store.add_first_admin(user).await?;
        tracing::info!(user_id = %public_user.id, "First admin created");

        Ok(public_user)
    }
}
