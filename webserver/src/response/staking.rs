use orm::delegations::{DebondingDelegationSeqDb, DelegationSeqDb};
use orm::staking::StakingSeqDb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Staking {
    pub chain_id: String,
    pub height: i64,
    pub time: String,
    pub total_supply: String,
    pub common_pool: String,
}

impl From<StakingSeqDb> for Staking {
    fn from(seq_db: StakingSeqDb) -> Self {
        Self {
            chain_id: seq_db.chain_id,
            height: seq_db.height,
            time: seq_db.time.and_utc().to_rfc3339(),
            total_supply: seq_db.total_supply.to_string(),
            common_pool: seq_db.common_pool.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Delegation {
    pub height: i64,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: String,
}

impl From<DelegationSeqDb> for Delegation {
    fn from(seq_db: DelegationSeqDb) -> Self {
        Self {
            height: seq_db.height,
            validator_uid: seq_db.validator_uid,
            delegator_uid: seq_db.delegator_uid,
            shares: seq_db.shares.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DebondingDelegation {
    pub height: i64,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: String,
    pub debond_end: i64,
}

impl From<DebondingDelegationSeqDb> for DebondingDelegation {
    fn from(seq_db: DebondingDelegationSeqDb) -> Self {
        Self {
            height: seq_db.height,
            validator_uid: seq_db.validator_uid,
            delegator_uid: seq_db.delegator_uid,
            shares: seq_db.shares.to_string(),
            debond_end: seq_db.debond_end,
        }
    }
}
