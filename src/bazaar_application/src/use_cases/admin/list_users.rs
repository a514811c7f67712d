use bazaar_core::{PublicUser, UserId, UserStore};

use super::AdminError;

pub struct ListUsersUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ListUsersUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<PublicUser>, AdminError> {
        let users = self.user_store.list_users().await?;
        Ok(users.iter().map(|user| user.public_view()).collect())
    }
}

pub struct GetUserUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> GetUserUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetUserUseCase::execute", skip(self))]
    pub async fn execute(&self, id: UserId) -> Result<PublicUser, AdminError> {
        Ok(self.user_store.get_user(&id).await?.public_view())
    }
}
