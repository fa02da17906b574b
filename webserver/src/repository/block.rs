use axum::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::sql_types::{Int8, Numeric, Nullable, Timestamp};
use diesel::{
    ExpressionMethods, QueryDsl, QueryableByName, RunQueryDsl,
    SelectableHelper,
};
use orm::blocks::BlockSeqDb;
use orm::schema::{block_sequences, block_summaries};
use orm::summaries::{BlockSummaryDb, SummaryIntervalDb};

use crate::appstate::AppState;

/// Aggregated view over the most recent blocks.
#[derive(Debug, Clone, QueryableByName)]
pub struct BlockTimesRow {
    #[diesel(sql_type = Nullable<Int8>)]
    pub start_height: Option<i64>,
    #[diesel(sql_type = Nullable<Int8>)]
    pub end_height: Option<i64>,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub start_time: Option<NaiveDateTime>,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub end_time: Option<NaiveDateTime>,
    #[diesel(sql_type = Int8)]
    pub count: i64,
    #[diesel(sql_type = Numeric)]
    pub avg: BigDecimal,
}

#[derive(Clone)]
pub struct BlockRepository {
    pub(crate) app_state: AppState,
}

#[async_trait]
pub trait BlockRepositoryTrait {
    fn new(app_state: AppState) -> Self;

    async fn find_block_by_height(
        &self,
        height: i64,
    ) -> Result<Option<BlockSeqDb>, String>;

    async fn find_block_times(
        &self,
        limit: i64,
    ) -> Result<BlockTimesRow, String>;

    async fn find_block_summaries(
        &self,
        interval: SummaryIntervalDb,
    ) -> Result<Vec<BlockSummaryDb>, String>;
}

#[async_trait]
impl BlockRepositoryTrait for BlockRepository {
    fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    async fn find_block_by_height(
        &self,
        height: i64,
    ) -> Result<Option<BlockSeqDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            block_sequences::table
                .filter(block_sequences::height.eq(height))
                .select(BlockSeqDb::as_select())
                .first(conn)
                .ok()
        })
        .await
        .map_err(|e| e.to_string())
    }

    async fn find_block_times(
        &self,
        limit: i64,
    ) -> Result<BlockTimesRow, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            diesel::sql_query(
                "SELECT min(height) AS start_height, \
                        max(height) AS end_height, \
                        min(time) AS start_time, \
                        max(time) AS end_time, \
                        count(*)::bigint AS count, \
                        (CASE WHEN count(*) > 1 \
                              THEN extract(epoch FROM max(time) - min(time)) / (count(*) - 1) \
                              ELSE 0 END)::numeric AS avg \
                 FROM (SELECT height, time \
                       FROM block_sequences \
                       ORDER BY height DESC \
                       LIMIT $1) last_blocks",
            )
            .bind::<Int8, _>(limit)
            .get_result(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }

    async fn find_block_summaries(
        &self,
        interval: SummaryIntervalDb,
    ) -> Result<Vec<BlockSummaryDb>, String> {
        let conn = self.app_state.get_db_connection().await;

        conn.interact(move |conn| {
            block_summaries::table
                .filter(block_summaries::time_interval.eq(interval))
                .select(BlockSummaryDb::as_select())
                .order(block_summaries::time_bucket.asc())
                .load(conn)
        })
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
    }
}
