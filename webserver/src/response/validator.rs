use orm::validators::ValidatorSeqDb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Validator {
    pub chain_id: String,
    pub height: i64,
    pub time: String,
    pub entity_uid: String,
    pub node_uid: String,
    pub address: String,
    pub voting_power: i64,
    pub total_shares: String,
    pub commission: String,
    pub active_escrow_balance: String,
    pub proposed: bool,
    pub precommit_validated: Option<bool>,
    pub precommit_block_id_flag: i64,
    pub precommit_index: i64,
    pub rewards: String,
}

impl From<ValidatorSeqDb> for Validator {
    fn from(seq_db: ValidatorSeqDb) -> Self {
        Self {
            chain_id: seq_db.chain_id,
            height: seq_db.height,
            time: seq_db.time.and_utc().to_rfc3339(),
            entity_uid: seq_db.entity_uid,
            node_uid: seq_db.node_uid,
            address: seq_db.address,
            voting_power: seq_db.voting_power,
            total_shares: seq_db.total_shares.to_string(),
            commission: seq_db.commission.to_string(),
            active_escrow_balance: seq_db.active_escrow_balance.to_string(),
            proposed: seq_db.proposed,
            precommit_validated: seq_db.precommit_validated,
            precommit_block_id_flag: seq_db.precommit_block_id_flag,
            precommit_index: seq_db.precommit_index,
            rewards: seq_db.rewards.to_string(),
        }
    }
}
