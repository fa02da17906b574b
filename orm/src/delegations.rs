use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use shared::staking::{DebondingDelegationSeq, DelegationSeq};

use crate::schema::{debonding_delegation_sequences, delegation_sequences};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = delegation_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DelegationSeqDb {
    pub id: i64,
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = delegation_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DelegationSeqInsertDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
}

impl DelegationSeqInsertDb {
    pub fn from_delegation_seq(seq: DelegationSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            validator_uid: seq.validator_uid,
            delegator_uid: seq.delegator_uid,
            shares: seq.shares,
        }
    }
}

impl From<DelegationSeqDb> for DelegationSeq {
    fn from(db: DelegationSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            validator_uid: db.validator_uid,
            delegator_uid: db.delegator_uid,
            shares: db.shares,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = debonding_delegation_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DebondingDelegationSeqDb {
    pub id: i64,
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
    pub debond_end: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = debonding_delegation_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DebondingDelegationSeqInsertDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
    pub debond_end: i64,
}

impl DebondingDelegationSeqInsertDb {
    pub fn from_debonding_delegation_seq(seq: DebondingDelegationSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            validator_uid: seq.validator_uid,
            delegator_uid: seq.delegator_uid,
            shares: seq.shares,
            debond_end: seq.debond_end,
        }
    }
}

impl From<DebondingDelegationSeqDb> for DebondingDelegationSeq {
    fn from(db: DebondingDelegationSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            validator_uid: db.validator_uid,
            delegator_uid: db.delegator_uid,
            shares: db.shares,
            debond_end: db.debond_end,
        }
    }
}
