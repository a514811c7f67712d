use bazaar_core::{PublicUser, UserId, UserStore};

use super::AdminError;

pub struct PromoteToAdminUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> PromoteToAdminUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Promoting an admin is a no-op that still succeeds.
    #[tracing::instrument(name = "PromoteToAdminUseCase::execute", skip(self))]
    pub async fn execute(&self, id: UserId) -> Result<PublicUser, AdminError> {
        let user = self.user_store.promote(&id).await?;
        tracing::info!(user_id = %id, "User promoted to admin");
        Ok(user.public_view())
    }
}
