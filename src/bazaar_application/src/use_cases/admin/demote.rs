use bazaar_core::{PublicUser, UserId, UserStore};

use super::AdminError;

pub struct DemoteFromAdminUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> DemoteFromAdminUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Refuses to demote the last remaining admin. The count and the role
    /// change happen in one store operation.
    #[tracing::instrument(name = "DemoteFromAdminUseCase::execute", skip(self))]
    pub async fn execute(&self, id: UserId) -> Result<PublicUser, AdminError> {
        let user = self.user_store.demote_admin(&id).await?;
        tracing::info!(user_id = %id, "User demoted to customer");
        Ok(user.public_view())
    }
}
