use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use axum_macros::debug_handler;

use crate::error::api::ApiError;
use crate::response::transaction::Transaction;
use crate::state::common::CommonState;

#[debug_handler]
pub async fn get_transactions_by_height(
    _headers: HeaderMap,
    Path(height): Path<i64>,
    State(state): State<CommonState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = state
        .transaction_service
        .get_transactions_by_height(height)
        .await?;

    Ok(Json(transactions))
}
