use axum::async_trait;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::accounts::AccountAggDb;
use orm::schema::account_aggregates;

use crate::appstate::AppState;

#[derive(Clone)]
pub struct AccountRepository {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait AccountRepositoryTrait {
    fn new(app_state: AppState) -> Self;

    async fn find_by_public_key(
        &self,
        public_key: String,
    ) -> Result<Option<AccountAggDb>, String>;
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn find_by_public_key(
        &self,
        public_key: String,
    ) -> Result<Option<AccountAggDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            account_aggregates::table
                .filter(account_aggregates::public_key.eq(public_key))
                .select(AccountAggDb::as_select())
                .first(conn)
                .ok()
        })
        .await
        .map_err(|e| e.to_string())
    }
}
