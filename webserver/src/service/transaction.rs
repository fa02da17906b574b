use crate::appstate::AppState;
use crate::error::transaction::TransactionError;
use crate::repository::transaction::{
    TransactionRepository, TransactionRepositoryTrait,
};
use crate::response::transaction::Transaction;

#[derive(Clone)]
pub struct TransactionService {
    transaction_repo: TransactionRepository,
}

impl TransactionService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            transaction_repo: TransactionRepository::new(app_state),
        }
    }

    pub async fn get_transactions_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<Transaction>, TransactionError> {
        let transactions = self
            .transaction_repo
            .find_txs_by_height(height)
            .await
            .map_err(TransactionError::Database)?;

        Ok(transactions.into_iter().map(Transaction::from).collect())
    }
}
