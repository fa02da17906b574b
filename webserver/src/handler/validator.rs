use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_macros::debug_handler;

use crate::error::api::ApiError;
use crate::response::validator::Validator;
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_validators_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Vec<Validator>>, ApiError> {
    let validators = state
        .validator_service
        .get_validators_by_height(height)
        .await?;

    Ok(Json(validators))
}
