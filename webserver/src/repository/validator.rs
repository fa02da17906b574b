use axum::async_trait;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::schema::{validator_aggregates, validator_sequences};
use orm::validators::{ValidatorAggDb, ValidatorSeqDb};

use crate::appstate::AppState;

#[derive(Clone)]
pub struct ValidatorRepository {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait ValidatorRepositoryTrait {
    fn new(app_state: AppState) -> Self;

    async fn find_seqs_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<ValidatorSeqDb>, String>;

    async fn find_agg_by_entity_uid(
        &self,
        entity_uid: String,
    ) -> Result<Option<ValidatorAggDb>, String>;
}

#[async_trait]
impl ValidatorRepositoryTrait for ValidatorRepository {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn find_seqs_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<ValidatorSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            validator_sequences::table
                .filter(validator_sequences::height.eq(height))
                .select(ValidatorSeqDb::as_select())
                .order(validator_sequences::precommit_index.asc())
                .load(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }

    async fn find_agg_by_entity_uid(
        &self,
        entity_uid: String,
    ) -> Result<Option<ValidatorAggDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            validator_aggregates::table
                .filter(validator_aggregates::entity_uid.eq(entity_uid))
                .select(ValidatorAggDb::as_select())
                .first(conn)
                .ok()
        })
        .await
        .map_err(|e| e.to_string())
    }
}
