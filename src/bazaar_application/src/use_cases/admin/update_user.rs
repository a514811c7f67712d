use bazaar_core::{PasswordHasher, PublicUser, Role, UserId, UserPatch, UserStore};

use super::AdminError;
use crate::use_cases::shared::apply_patch;

/// Admin edit of any account. Role changes are not accepted here.
pub struct AdminUpdateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> AdminUpdateUserUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the admin update
    ///
    /// A patch asking for `admin` is always refused. Asking for `customer` is
    /// accepted only when it changes nothing; demotion has its own endpoint.
    #[tracing::instrument(name = "AdminUpdateUserUseCase::execute", skip(self, patch))]
    pub async fn execute(&self, id: UserId, patch: UserPatch) -> Result<PublicUser, AdminError> {
        if patch.role == Some(Role::Admin) {
            return Err(AdminError::RoleEscalation);
        }

        let user = self.user_store.get_user(&id).await?;
        if patch.role.is_some_and(|role| role != user.role) {
            return Err(AdminError::RoleChangeNotAllowed);
        }

        let updated = apply_patch(self.user_store, self.hasher, &id, patch).await?;

        Ok(updated.public_view())
    }
}
