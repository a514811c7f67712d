//! Routes for the signed-in user's own account. Mounted behind a gate that
//! admits every role and supplies the [`Principal`].

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use bazaar_adapters::{ApiError, handlers};
use bazaar_core::{PasswordHasher, Principal, UserPatch, UserStore};

use super::requests::UserPatchRequest;
use crate::{adapters::response_builder, state::StorefrontState};

#[tracing::instrument(name = "Get profile", skip_all, fields(user_id = %principal.user_id))]
pub async fn get_profile<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    handlers::handle_get_profile(&state.user_store, principal.user_id, response_builder()).await
}

#[tracing::instrument(name = "Update profile", skip_all, fields(user_id = %principal.user_id))]
pub async fn update_profile<U, H>(
    State(state): State<StorefrontState<U, H>>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<UserPatchRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;
    let patch = UserPatch::try_from(request)?;

    handlers::handle_update_profile(
        &state.user_store,
        &state.hasher,
        principal.user_id,
        patch,
        response_builder(),
    )
    .await
}
