use bazaar_core::{
    PasswordHasher, PasswordHasherError, PublicUser, UserId, UserPatch, UserStore, UserStoreError,
};

use super::shared::{PatchError, apply_patch};

/// Error types for the own-profile use cases
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PasswordHasherError(#[from] PasswordHasherError),
    #[error("Role cannot be changed through profile updates")]
    RoleChangeNotAllowed,
}

impl From<PatchError> for ProfileError {
    fn from(error: PatchError) -> Self {
        match error {
            PatchError::UserStoreError(e) => e.into(),
            PatchError::PasswordHasherError(e) => e.into(),
        }
    }
}

/// Returns the caller's own account.
pub struct GetProfileUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> GetProfileUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<PublicUser, ProfileError> {
        let user = self.user_store.get_user(&user_id).await?;
        Ok(user.public_view())
    }
}

/// Lets a signed-in user edit their own account.
pub struct UpdateProfileUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> UpdateProfileUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        user_id: UserId,
        patch: UserPatch,
    ) -> Result<PublicUser, ProfileError> {
        if patch.role.is_some() {
            return Err(ProfileError::RoleChangeNotAllowed);
        }

        let updated = apply_patch(self.user_store, self.hasher, &user_id, patch).await?;

        Ok(updated.public_view())
    }
}
