use std::collections::HashMap;
use std::sync::Arc;

use bazaar_core::{
    DuplicateField, Email, PasswordHash, PasswordReset, Phone, ResetToken, Role, User,
    UserChanges, UserId, UserStore, UserStoreError,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// In-memory user store. Every write takes the single write lock, so the
/// uniqueness checks, the first-admin bootstrap, last-admin demotion and
/// reset-token consumption are all atomic.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn find_collision(users: &HashMap<UserId, User>, candidate: &User) -> Option<DuplicateField> {
    let others = users.values().filter(|user| user.id != candidate.id);
    for user in others {
        if user.email == candidate.email {
            return Some(DuplicateField::Email);
        }
        if user.phone == candidate.phone {
            return Some(DuplicateField::Phone);
        }
    }
    None
}

fn admin_count(users: &HashMap<UserId, User>) -> usize {
    users.values().filter(|user| user.is_admin()).count()
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(field) = find_collision(&users, &user) {
            return Err(UserStoreError::UserAlreadyExists(field));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn add_first_admin(&self, mut user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if admin_count(&users) > 0 {
            return Err(UserStoreError::AdminAlreadyExists);
        }
        if let Some(field) = find_collision(&users, &user) {
            return Err(UserStoreError::UserAlreadyExists(field));
        }
        user.role = Role::Admin;
        users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| &user.phone == phone).cloned())
    }

    async fn find_by_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| {
                user.password_reset
                    .as_ref()
                    .is_some_and(|reset| reset.authorizes(token, now))
            })
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut listed: Vec<User> = users.values().cloned().collect();
        listed.sort_by_key(|user| user.created_at);
        Ok(listed)
    }

    async fn count_users(&self) -> Result<u64, UserStoreError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|user| user.role == role).count() as u64)
    }

    async fn update_user(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let mut updated = users.get(id).cloned().ok_or(UserStoreError::UserNotFound)?;
        changes.apply_to(&mut updated);
        if let Some(field) = find_collision(&users, &updated) {
            return Err(UserStoreError::UserAlreadyExists(field));
        }
        users.insert(*id, updated.clone());
        Ok(updated)
    }

    async fn set_password_reset(
        &self,
        id: &UserId,
        reset: PasswordReset,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.begin_password_reset(reset.token, reset.expires_at);
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
        password_hash: PasswordHash,
    ) -> Result<Option<User>, UserStoreError> {
        let mut users = self.users.write().await;
        let holder = users.values_mut().find(|user| {
            user.password_reset
                .as_ref()
                .is_some_and(|reset| reset.authorizes(token, now))
        });
        Ok(holder.map(|user| {
            user.replace_password(password_hash);
            user.clone()
        }))
    }

    async fn promote(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if !user.is_admin() {
            user.role = Role::Admin;
            user.touch();
        }
        Ok(user.clone())
    }

    async fn demote_admin(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let admins = admin_count(&users);
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if user.is_admin() {
            if admins <= 1 {
                return Err(UserStoreError::LastAdmin);
            }
            user.role = Role::Customer;
            user.touch();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get(id).ok_or(UserStoreError::UserNotFound)?;
        if user.is_admin() {
            return Err(UserStoreError::ProtectedAdmin);
        }
        users.remove(id);
        Ok(())
    }
}
