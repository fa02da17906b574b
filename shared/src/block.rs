use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type BlockHeight = i64;

/// Block id flag carried by a vote that committed the block.
pub const BLOCK_ID_FLAG_COMMIT: i64 = 2;
/// Block id flag assigned to validators the block carries no vote for.
pub const BLOCK_ID_FLAG_ABSENT: i64 = 3;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainHead {
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub chain_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainStatus {
    pub chain_id: String,
    pub last_block_height: BlockHeight,
    pub node_version: String,
}

/// Per-height chain metadata, seeded into the payload by the setup stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeightMeta {
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub chain_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConstants {
    pub common_pool_address: String,
    pub debonding_interval: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBlock {
    pub header: RawBlockHeader,
    pub last_commit: RawCommit,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBlockHeader {
    pub height: BlockHeight,
    pub proposer_address: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCommit {
    pub votes: Vec<RawVote>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVote {
    pub validator_index: i64,
    pub block_id_flag: i64,
}

/// Per-height derived block row.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub transactions_count: i64,
    pub proposer_entity_uid: String,
}
