use bazaar_core::{UserId, UserStore, UserStoreError};

use super::AdminError;

pub struct DeleteUserUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> DeleteUserUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Admin accounts can never be deleted, whatever the admin count.
    #[tracing::instrument(name = "DeleteUserUseCase::execute", skip(self))]
    pub async fn execute(&self, id: UserId) -> Result<(), AdminError> {
        let user = self.user_store.get_user(&id).await?;
        if user.is_admin() {
            return Err(AdminError::CannotDeleteAdmin);
        }

        match self.user_store.delete_user(&id).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "User deleted");
                Ok(())
            }
            // promoted between the read and the delete
            Err(UserStoreError::ProtectedAdmin) => Err(AdminError::CannotDeleteAdmin),
            Err(e) => Err(e.into()),
        }
    }
}
