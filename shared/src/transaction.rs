use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransaction {
    pub hash: String,
    pub public_key: String,
    pub nonce: i64,
    pub method: String,
    pub fee: BigDecimal,
    pub gas_limit: i64,
    pub gas_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSeq {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub hash: String,
    pub public_key: String,
    pub nonce: i64,
    pub method: String,
    pub fee: BigDecimal,
    pub gas_limit: i64,
    pub gas_price: BigDecimal,
}
