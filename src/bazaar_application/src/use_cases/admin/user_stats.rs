use bazaar_core::{Role, UserStore};
use serde::Serialize;

use super::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub admins: u64,
    pub customers: u64,
}

pub struct UserStatsUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> UserStatsUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "UserStatsUseCase::execute", skip(self))]
    pub async fn execute(&self) -> Result<UserStats, AdminError> {
        Ok(UserStats {
            total: self.user_store.count_users().await?,
            admins: self.user_store.count_by_role(Role::Admin).await?,
            customers: self.user_store.count_by_role(Role::Customer).await?,
        })
    }
}
