use axum::async_trait;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use orm::delegations::{DebondingDelegationSeqDb, DelegationSeqDb};
use orm::schema::{
    debonding_delegation_sequences, delegation_sequences, staking_sequences,
};
use orm::staking::StakingSeqDb;

use crate::appstate::AppState;

#[derive(Clone)]
pub struct StakingRepository {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait StakingRepositoryTrait {
    fn new(app_state: AppState) -> Self;

    async fn find_staking_by_height(
        &self,
        height: i64,
    ) -> Result<Option<StakingSeqDb>, String>;

    async fn find_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<DelegationSeqDb>, String>;

    async fn find_debonding_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<DebondingDelegationSeqDb>, String>;
}

#[async_trait]
impl StakingRepositoryTrait for StakingRepository {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn find_staking_by_height(
        &self,
        height: i64,
    ) -> Result<Option<StakingSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            staking_sequences::table
                .filter(staking_sequences::height.eq(height))
                .select(StakingSeqDb::as_select())
                .first(conn)
                .ok()
        })
        .await
        .map_err(|e| e.to_string())
    }

    async fn find_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<DelegationSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            delegation_sequences::table
                .filter(delegation_sequences::height.eq(height))
                .select(DelegationSeqDb::as_select())
                .order(delegation_sequences::id.asc())
                .load(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }

    async fn find_debonding_delegations_by_height(
        &self,
        height: i64,
    ) -> Result<Vec<DebondingDelegationSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            debonding_delegation_sequences::table
                .filter(debonding_delegation_sequences::height.eq(height))
                .select(DebondingDelegationSeqDb::as_select())
                .order(debonding_delegation_sequences::id.asc())
                .load(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }
}
