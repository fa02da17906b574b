use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawValidator {
    pub address: String,
    pub entity_uid: String,
    pub node_uid: String,
    pub consensus_uid: String,
    pub tendermint_address: String,
    pub voting_power: i64,
    pub commission: BigDecimal,
}

/// Per-height derived validator row.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub entity_uid: String,
    pub node_uid: String,
    pub consensus_uid: String,
    pub address: String,
    pub voting_power: i64,
    pub total_shares: BigDecimal,
    pub commission: BigDecimal,
    pub active_escrow_balance: BigDecimal,
    pub proposed: bool,
    pub precommit_validated: Option<bool>,
    pub precommit_block_id_flag: i64,
    pub precommit_index: i64,
    pub rewards: BigDecimal,
}

/// Latest-known validator state, advanced forward in height.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorAgg {
    pub entity_uid: String,
    pub recent_address: String,
    pub recent_tendermint_address: String,
    pub recent_voting_power: i64,
    pub recent_total_shares: BigDecimal,
    pub first_height: BlockHeight,
    pub first_time: NaiveDateTime,
    pub recent_height: BlockHeight,
    pub recent_time: NaiveDateTime,
}
