use axum::async_trait;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::transaction_sequences;
use orm::transactions::TransactionSeqDb;

use crate::appstate::AppState;

#[derive(Clone)]
pub struct TransactionRepository {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait TransactionRepositoryTrait {
    fn new(app_state: AppState) -> Self;

    async fn find_txs_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<TransactionSeqDb>, String>;
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn find_txs_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<TransactionSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            transaction_sequences::table
                .filter(transaction_sequences::height.eq(height))
                .select(TransactionSeqDb::as_select())
                .order(transaction_sequences::id.asc())
                .load(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }
}
