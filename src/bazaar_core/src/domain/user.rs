use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Serialize;

use super::{
    email::Email,
    password::{Password, PasswordHash},
    phone::Phone,
    reset_token::ResetToken,
    role::Role,
    user_id::UserId,
};

/// Descriptive, non-credential fields of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: bool,
}

impl Profile {
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
            username: None,
            profile_image: None,
            is_active: true,
        }
    }
}

/// Reset token and its expiry. They only ever exist together.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: ResetToken,
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    /// A reset authorizes a password change only with a matching token
    /// strictly before its expiry.
    pub fn authorizes(&self, token: &ResetToken, now: DateTime<Utc>) -> bool {
        self.token == *token && self.expires_at > now
    }
}

/// Validated input for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: Password,
    pub phone: Phone,
    pub profile: Profile,
}

/// A user record as held by the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub phone: Phone,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub profile: Profile,
    pub password_reset: Option<PasswordReset>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: Email,
        phone: Phone,
        password_hash: PasswordHash,
        role: Role,
        profile: Profile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            phone,
            password_hash,
            role,
            profile,
            password_reset: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn begin_password_reset(&mut self, token: ResetToken, expires_at: DateTime<Utc>) {
        self.password_reset = Some(PasswordReset { token, expires_at });
        self.touch();
    }

    /// Replaces the password hash and consumes any outstanding reset token.
    pub fn replace_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
        self.password_reset = None;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The only projection of a user that may leave the service.
    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.as_ref().expose_secret().clone(),
            phone: self.phone.clone(),
            first_name: self.profile.first_name.clone(),
            last_name: self.profile.last_name.clone(),
            username: self.profile.username.clone(),
            profile_image: self.profile.profile_image.clone(),
            is_active: self.profile.is_active,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User record with the password hash and reset-token fields removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub phone: Phone,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a user. `None` leaves a field untouched.
///
/// The optional `role` is carried only so it can be rejected: role changes
/// go through promotion and demotion, never through a generic update.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub password: Option<Password>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<Role>,
}

/// Column-level write of a user. `None` leaves the stored value untouched,
/// so concurrent writers that change different columns never undo each other.
///
/// Role and reset-token columns are not part of it; they have their own
/// store operations.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub password_hash: Option<PasswordHash>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Writes every `Some` field into `user` and bumps `updated_at`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.profile.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.profile.last_name = last_name.clone();
        }
        if let Some(username) = &self.username {
            user.profile.username = Some(username.clone());
        }
        if let Some(profile_image) = &self.profile_image {
            user.profile.profile_image = Some(profile_image.clone());
        }
        if let Some(is_active) = self.is_active {
            user.profile.is_active = is_active;
        }
        user.touch();
    }
}
