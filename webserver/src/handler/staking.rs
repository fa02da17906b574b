use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_macros::debug_handler;

use crate::error::api::ApiError;
use crate::response::staking::{Delegation, DebondingDelegation, Staking};
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_staking_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Staking>, ApiError> {
    let staking = state.staking_service.get_staking_by_height(height).await?;

    Ok(Json(staking))
}

#[debug_handler]
pub async fn get_delegations_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Vec<Delegation>>, ApiError> {
    let delegations = state
        .staking_service
        .get_delegations_by_height(height)
        .await?;

    Ok(Json(delegations))
}

#[debug_handler]
pub async fn get_debonding_delegations_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Vec<DebondingDelegation>>, ApiError> {
    let delegations = state
        .staking_service
        .get_debonding_delegations_by_height(height)
        .await?;

    Ok(Json(delegations))
}
