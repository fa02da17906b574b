use orm::blocks::BlockSeqDb;
use orm::summaries::BlockSummaryDb;
use serde::{Deserialize, Serialize};

use crate::repository::block::BlockTimesRow;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Block {
    pub chain_id: String,
    pub height: i64,
    pub time: String,
    pub transactions_count: i64,
    pub proposer_entity_uid: String,
}

impl From<BlockSeqDb> for Block {
    fn from(block_db: BlockSeqDb) -> Self {
        Self {
            chain_id: block_db.chain_id,
            height: block_db.height,
            time: block_db.time.and_utc().to_rfc3339(),
            transactions_count: block_db.transactions_count,
            proposer_entity_uid: block_db.proposer_entity_uid,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BlockTimes {
    pub start_height: Option<i64>,
    pub end_height: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub count: i64,
    pub avg_seconds: String,
}

impl From<BlockTimesRow> for BlockTimes {
    fn from(row: BlockTimesRow) -> Self {
        Self {
            start_height: row.start_height,
            end_height: row.end_height,
            start_time: row.start_time.map(|t| t.and_utc().to_rfc3339()),
            end_time: row.end_time.map(|t| t.and_utc().to_rfc3339()),
            count: row.count,
            avg_seconds: row.avg.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BlockTimeBucket {
    pub time_bucket: String,
    pub count: i64,
    pub block_time_avg: String,
}

impl From<BlockSummaryDb> for BlockTimeBucket {
    fn from(summary_db: BlockSummaryDb) -> Self {
        Self {
            time_bucket: summary_db.time_bucket.and_utc().to_rfc3339(),
            count: summary_db.count,
            block_time_avg: summary_db.block_time_avg.to_string(),
        }
    }
}
