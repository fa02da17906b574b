use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_macros::debug_handler;

use crate::error::api::ApiError;
use crate::response::account::Account;
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_account_by_public_key(
    _headers: HeaderMap,
    Path(public_key): Path<String>,
    State(state): State<CommonState>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .account_service
        .get_account_by_public_key(public_key)
        .await?;

    Ok(Json(account))
}
