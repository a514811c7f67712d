//! Steps shared by several use cases.

use bazaar_core::{
    DuplicateField, Email, PasswordHasher, PasswordHasherError, Phone, User, UserChanges, UserId,
    UserPatch, UserStore, UserStoreError,
};

/// Fails with `UserAlreadyExists` when `email` or `phone` belongs to a user
/// other than `owner`.
///
/// This is a fast path for a friendly error. Stores still enforce uniqueness
/// when the row is written.
pub(crate) async fn ensure_contact_available<U>(
    user_store: &U,
    email: Option<&Email>,
    phone: Option<&Phone>,
    owner: Option<&UserId>,
) -> Result<(), UserStoreError>
where
    U: UserStore + ?Sized,
{
    let belongs_to_other = |user: &User| owner != Some(&user.id);

    if let Some(email) = email {
        if let Some(existing) = user_store.find_by_email(email).await? {
            if belongs_to_other(&existing) {
                return Err(UserStoreError::UserAlreadyExists(DuplicateField::Email));
            }
        }
    }

    if let Some(phone) = phone {
        if let Some(existing) = user_store.find_by_phone(phone).await? {
            if belongs_to_other(&existing) {
                return Err(UserStoreError::UserAlreadyExists(DuplicateField::Phone));
            }
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PatchError {
    #[error(transparent)]
    UserStoreError(#[from] UserStoreError),
    #[error(transparent)]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Writes every field of `patch` except `role` to the user behind `id`.
///
/// Only the fields the patch sets are written, so a reset token or profile
/// change stored while the password was hashing survives.
pub(crate) async fn apply_patch<U, H>(
    user_store: &U,
    hasher: &H,
    id: &UserId,
    patch: UserPatch,
) -> Result<User, PatchError>
where
    U: UserStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    ensure_contact_available(
        user_store,
        patch.email.as_ref(),
        patch.phone.as_ref(),
        Some(id),
    )
    .await?;

    let password_hash = match patch.password {
        Some(password) => Some(hasher.hash(password).await?),
        None => None,
    };

    let changes = UserChanges {
        email: patch.email,
        phone: patch.phone,
        password_hash,
        first_name: patch.first_name,
        last_name: patch.last_name,
        username: patch.username,
        profile_image: patch.profile_image,
        is_active: patch.is_active,
    };

    Ok(user_store.update_user(id, &changes).await?)
}
