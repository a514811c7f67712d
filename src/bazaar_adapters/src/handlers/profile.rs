//! The signed-in user's own account.

use bazaar_application::{GetProfileUseCase, UpdateProfileUseCase};
use bazaar_core::{
    AuthResponseBuilder, AuthResponseHelpers, PasswordHasher, UserId, UserPatch, UserStore,
};

use super::to_json;
use crate::http::error::ApiError;

pub async fn handle_get_profile<U, B>(
    user_store: &U,
    user_id: UserId,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let user = GetProfileUseCase::new(user_store).execute(user_id).await?;
    Ok(builder.ok_json(to_json(&user)?))
}

pub async fn handle_update_profile<U, H, B>(
    user_store: &U,
    hasher: &H,
    user_id: UserId,
    patch: UserPatch,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    B: AuthResponseBuilder,
{
    let user = UpdateProfileUseCase::new(user_store, hasher)
        .execute(user_id, patch)
        .await?;

    Ok(builder.ok_json(to_json(&user)?))
}
