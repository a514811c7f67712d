//! In-memory doubles for the ports, shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bazaar_core::{
    AuthToken, DuplicateField, Email, NewUser, Password, PasswordHash, PasswordHasher,
    PasswordHasherError, PasswordReset, Phone, Profile, ResetToken, Role, TokenIssuer,
    TokenIssuerError, User, UserChanges, UserId, UserStore, UserStoreError,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub(crate) fn email(raw: &str) -> Email {
    Email::parse(Secret::new(raw.to_string())).unwrap()
}

pub(crate) fn password(raw: &str) -> Password {
    Password::parse(Secret::new(raw.to_string())).unwrap()
}

pub(crate) fn phone(raw: &str) -> Phone {
    Phone::parse(raw).unwrap()
}

pub(crate) fn new_user(email_raw: &str, phone_raw: &str) -> NewUser {
    NewUser {
        email: email(email_raw),
        password: password("correct horse battery"),
        phone: phone(phone_raw),
        profile: Profile::new("Jane".to_string(), "Doe".to_string()),
    }
}

#[derive(Default, Clone)]
pub(crate) struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MockUserStore {
    async fn seed(
        &self,
        email_raw: &str,
        phone_raw: &str,
        raw_password: &str,
        role: Role,
    ) -> UserId {
        let user = User::new(
            email(email_raw),
            phone(phone_raw),
            PasswordHash::new(Secret::new(format!("hashed:{raw_password}"))),
            role,
            Profile::new("Jane".to_string(), "Doe".to_string()),
        );
        let id = user.id;
        self.add_user(user).await.unwrap();
        id
    }

    pub(crate) async fn seed_customer(&self, email: &str, phone: &str, password: &str) -> UserId {
        self.seed(email, phone, password, Role::Customer).await
    }

    pub(crate) async fn seed_admin(&self, email: &str, phone: &str, password: &str) -> UserId {
        self.seed(email, phone, password, Role::Admin).await
    }
}

fn collision(users: &HashMap<UserId, User>, candidate: &User) -> Option<DuplicateField> {
    users
        .values()
        .filter(|user| user.id != candidate.id)
        .find_map(|user| {
            if user.email == candidate.email {
                Some(DuplicateField::Email)
            } else if user.phone == candidate.phone {
                Some(DuplicateField::Phone)
            } else {
                None
            }
        })
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(field) = collision(&users, &user) {
            return Err(UserStoreError::UserAlreadyExists(field));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn add_first_admin(&self, mut user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(User::is_admin) {
            return Err(UserStoreError::AdminAlreadyExists);
        }
        if let Some(field) = collision(&users, &user) {
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
        Ok(users.values().cloned().collect())
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
        if let Some(field) = collision(&users, &updated) {
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
        let Some(user) = users.values_mut().find(|user| {
            user.password_reset
                .as_ref()
                .is_some_and(|reset| reset.authorizes(token, now))
        }) else {
            return Ok(None);
        };
        user.replace_password(password_hash);
        Ok(Some(user.clone()))
    }

    async fn promote(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.role = Role::Admin;
        Ok(user.clone())
    }

    async fn demote_admin(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let admins = users.values().filter(|user| user.is_admin()).count();
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if user.is_admin() && admins <= 1 {
            return Err(UserStoreError::LastAdmin);
        }
        user.role = Role::Customer;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        match users.get(id) {
            None => Err(UserStoreError::UserNotFound),
            Some(user) if user.is_admin() => Err(UserStoreError::ProtectedAdmin),
            Some(_) => {
                users.remove(id);
                Ok(())
            }
        }
    }
}

/// Stores `hashed:<password>` so tests can read back what was hashed.
pub(crate) struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: Password,
        expected: PasswordHash,
    ) -> Result<(), PasswordHasherError> {
        let candidate = format!("hashed:{}", candidate.as_ref().expose_secret());
        if &candidate == expected.as_ref().expose_secret() {
            Ok(())
        } else {
            Err(PasswordHasherError::PasswordMismatch)
        }
    }
}

/// `FakeHasher` that yields to the scheduler before hashing, so two use cases
/// joined on one task interleave around the hash like they would around a
/// real, slow one.
pub(crate) struct YieldingHasher;

#[async_trait]
impl PasswordHasher for YieldingHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        tokio::task::yield_now().await;
        FakeHasher.hash(password).await
    }

    async fn verify(
        &self,
        candidate: Password,
        expected: PasswordHash,
    ) -> Result<(), PasswordHasherError> {
        FakeHasher.verify(candidate, expected).await
    }
}

pub(crate) struct FakeTokenIssuer;

impl TokenIssuer for FakeTokenIssuer {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<AuthToken, TokenIssuerError> {
        Ok(AuthToken::new(format!("token:{user_id}:{role}")))
    }
}
