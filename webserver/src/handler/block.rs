use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_macros::debug_handler;

use crate::error::api::ApiError;
use crate::response::block::{Block, BlockTimeBucket, BlockTimes};
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_block_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Block>, ApiError> {
    let block = state.block_service.get_block_by_height(height).await?;

    Ok(Json(block))
}

#[debug_handler]
pub async fn get_block_times(
    _headers: HeaderMap,
    Path(limit): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<BlockTimes>, ApiError> {
    let block_times = state.block_service.get_block_times(limit).await?;

    Ok(Json(block_times))
}

#[debug_handler]
pub async fn get_block_times_for_interval(
    _headers: HeaderMap,
    Path(interval): Path<String>,
    State(state): State<CommonState>,
) -> Result<Json<Vec<BlockTimeBucket>>, ApiError> {
    let buckets = state
        .block_service
        .get_block_times_for_interval(interval)
        .await?;

    Ok(Json(buckets))
}
