use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use shared::validator::{ValidatorAgg, ValidatorSeq};

use crate::schema::{validator_aggregates, validator_sequences};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = validator_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorSeqDb {
    pub id: i64,
    pub chain_id: String,
    pub height: i64,
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

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = validator_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorSeqInsertDb {
    pub chain_id: String,
    pub height: i64,
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

impl ValidatorSeqInsertDb {
    pub fn from_validator_seq(seq: ValidatorSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            entity_uid: seq.entity_uid,
            node_uid: seq.node_uid,
            consensus_uid: seq.consensus_uid,
            address: seq.address,
            voting_power: seq.voting_power,
            total_shares: seq.total_shares,
            commission: seq.commission,
            active_escrow_balance: seq.active_escrow_balance,
            proposed: seq.proposed,
            precommit_validated: seq.precommit_validated,
            precommit_block_id_flag: seq.precommit_block_id_flag,
            precommit_index: seq.precommit_index,
            rewards: seq.rewards,
        }
    }
}

impl From<ValidatorSeqDb> for ValidatorSeq {
    fn from(db: ValidatorSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            entity_uid: db.entity_uid,
            node_uid: db.node_uid,
            consensus_uid: db.consensus_uid,
            address: db.address,
            voting_power: db.voting_power,
            total_shares: db.total_shares,
            commission: db.commission,
            active_escrow_balance: db.active_escrow_balance,
            proposed: db.proposed,
            precommit_validated: db.precommit_validated,
            precommit_block_id_flag: db.precommit_block_id_flag,
            precommit_index: db.precommit_index,
            rewards: db.rewards,
        }
    }
}

#[derive(Debug, Clone, Insertable, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = validator_aggregates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ValidatorAggDb {
    pub entity_uid: String,
    pub recent_address: String,
    pub recent_tendermint_address: String,
    pub recent_voting_power: i64,
    pub recent_total_shares: BigDecimal,
    pub first_height: i64,
    pub first_time: NaiveDateTime,
    pub recent_height: i64,
    pub recent_time: NaiveDateTime,
}

pub type ValidatorAggInsertDb = ValidatorAggDb;

impl ValidatorAggInsertDb {
    pub fn from_validator_agg(agg: ValidatorAgg) -> Self {
        Self {
            entity_uid: agg.entity_uid,
            recent_address: agg.recent_address,
            recent_tendermint_address: agg.recent_tendermint_address,
            recent_voting_power: agg.recent_voting_power,
            recent_total_shares: agg.recent_total_shares,
            first_height: agg.first_height,
            first_time: agg.first_time,
            recent_height: agg.recent_height,
            recent_time: agg.recent_time,
        }
    }
}

impl From<ValidatorAggDb> for ValidatorAgg {
    fn from(db: ValidatorAggDb) -> Self {
        Self {
            entity_uid: db.entity_uid,
            recent_address: db.recent_address,
            recent_tendermint_address: db.recent_tendermint_address,
            recent_voting_power: db.recent_voting_power,
            recent_total_shares: db.recent_total_shares,
            first_height: db.first_height,
            first_time: db.first_time,
            recent_height: db.recent_height,
            recent_time: db.recent_time,
        }
    }
}
