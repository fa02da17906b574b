use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStakingState {
    pub total_supply: BigDecimal,
    pub common_pool: BigDecimal,
    pub accounts: Vec<RawAccount>,
    pub delegations: Vec<RawDelegation>,
    pub debonding_delegations: Vec<RawDebondingDelegation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAccount {
    pub address: String,
    pub general_balance: BigDecimal,
    pub escrow_active_balance: BigDecimal,
    pub escrow_debonding_balance: BigDecimal,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDelegation {
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDebondingDelegation {
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
    pub debond_end: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StakingSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub total_supply: BigDecimal,
    pub common_pool: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegationSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebondingDelegationSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub validator_uid: String,
    pub delegator_uid: String,
    pub shares: BigDecimal,
    pub debond_end: i64,
}
