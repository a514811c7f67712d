//! Admin user management. All but the first-admin bootstrap sit behind the
//! admin role gate.

use bazaar_application::{
    AdminUpdateUserUseCase, CreateFirstAdminUseCase, CreateUserUseCase, DeleteUserUseCase,
    DemoteFromAdminUseCase, GetUserUseCase, ListUsersUseCase, PromoteToAdminUseCase,
    UserStatsUseCase,
};
use bazaar_core::{
    AuthResponseBuilder, AuthResponseHelpers, NewUser, PasswordHasher, UserId, UserPatch,
    UserStore,
};

use super::to_json;
use crate::http::error::ApiError;

pub async fn handle_create_first_admin<U, H, B>(
    user_store: &U,
    hasher: &H,
    new_user: NewUser,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    B: AuthResponseBuilder,
{
    let admin = CreateFirstAdminUseCase::new(user_store, hasher)
        .execute(new_user)
        .await?;

    Ok(builder.created_json(to_json(&admin)?))
}

pub async fn handle_list_users<U, B>(user_store: &U, builder: B) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let users = ListUsersUseCase::new(user_store).execute().await?;
    Ok(builder.ok_json(to_json(&users)?))
}

pub async fn handle_get_user<U, B>(
    user_store: &U,
    id: UserId,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let user = GetUserUseCase::new(user_store).execute(id).await?;
    Ok(builder.ok_json(to_json(&user)?))
}

pub async fn handle_create_user<U, H, B>(
    user_store: &U,
    hasher: &H,
    new_user: NewUser,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    B: AuthResponseBuilder,
{
    let user = CreateUserUseCase::new(user_store, hasher)
        .execute(new_user)
        .await?;

    Ok(builder.created_json(to_json(&user)?))
}

pub async fn handle_update_user<U, H, B>(
    user_store: &U,
    hasher: &H,
    id: UserId,
    patch: UserPatch,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    B: AuthResponseBuilder,
{
    let user = AdminUpdateUserUseCase::new(user_store, hasher)
        .execute(id, patch)
        .await?;

    Ok(builder.ok_json(to_json(&user)?))
}

/// Answers `204` with an empty body.
pub async fn handle_delete_user<U, B>(
    user_store: &U,
    id: UserId,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    DeleteUserUseCase::new(user_store).execute(id).await?;
    Ok(builder.status(204).build())
}

pub async fn handle_promote<U, B>(
    user_store: &U,
    id: UserId,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let user = PromoteToAdminUseCase::new(user_store).execute(id).await?;
    Ok(builder.ok_json(to_json(&user)?))
}

pub async fn handle_demote<U, B>(
    user_store: &U,
    id: UserId,
    builder: B,
) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let user = DemoteFromAdminUseCase::new(user_store).execute(id).await?;
    Ok(builder.ok_json(to_json(&user)?))
}

pub async fn handle_user_stats<U, B>(user_store: &U, builder: B) -> Result<B::Response, ApiError>
where
    U: UserStore,
    B: AuthResponseBuilder,
{
    let stats = UserStatsUseCase::new(user_store).execute().await?;
    Ok(builder.ok_json(to_json(&stats)?))
}
