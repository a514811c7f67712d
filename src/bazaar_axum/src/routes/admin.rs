//! Admin user management routes.
//!
//! Everything here except [`create_first_admin`] is mounted behind the admin
//! role gate.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Response,
};
use bazaar_adapters::{ApiError, handlers};
use bazaar_core::{NewUser, PasswordHasher, UserId, UserPatch, UserStore};

use super::requests::{NewUserRequest, UserPatchRequest};
use crate::{adapters::response_builder, state::StorefrontState};

/// Public bootstrap. Only succeeds while the store holds no admin.
#[tracing::instrument(name = "Create first admin", skip_all)]
pub async fn create_first_admin<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<NewUserRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    let new_user = NewUser::try_from(request)?;

    handlers::handle_create_first_admin(
        &state.user_store,
        &state.hasher,
        new_user,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users<U, H>(
    State(state): State<StorefrontState<U, H>>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    handlers::handle_list_users(&state.user_store, response_builder()).await
}

#[tracing::instrument(name = "Get user", skip(state))]
pub async fn get_user<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let id = UserId::parse(&id)?;
    handlers::handle_get_user(&state.user_store, id, response_builder()).await
}

/// Creates a customer. Admins are only ever made by promotion.
#[tracing::instrument(name = "Create user", skip_all)]
pub async fn create_user<U, H>(
    State(state): State<StorefrontState<U, H>>,
    payload: Result<Json<NewUserRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    let new_user = NewUser::try_from(request)?;

    handlers::handle_create_user(
        &state.user_store,
        &state.hasher,
        new_user,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Update user", skip(state, payload))]
pub async fn update_user<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatchRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let id = UserId::parse(&id)?;
    let Json(request) = payload?;
    let patch = UserPatch::try_from(request)?;

    handlers::handle_update_user(
        &state.user_store,
        &state.hasher,
        id,
        patch,
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Delete user", skip(state))]
pub async fn delete_user<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let id = UserId::parse(&id)?;
    handlers::handle_delete_user(&state.user_store, id, response_builder()).await
}

#[tracing::instrument(name = "Promote user", skip(state))]
pub async fn promote<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let id = UserId::parse(&id)?;
    handlers::handle_promote(&state.user_store, id, response_builder()).await
}

#[tracing::instrument(name = "Demote user", skip(state))]
pub async fn demote<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let id = UserId::parse(&id)?;
    handlers::handle_demote(&state.user_store, id, response_builder()).await
}

#[tracing::instrument(name = "User stats", skip_all)]
pub async fn user_stats<U, H>(
    State(state): State<StorefrontState<U, H>>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    handlers::handle_user_stats(&state.user_store, response_builder()).await
}
