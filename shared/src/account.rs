use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;

use crate::block::BlockHeight;

/// Latest-known account state, advanced forward in height.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountAgg {
    pub public_key: String,
    pub recent_general_balance: BigDecimal,
    pub recent_escrow_active_balance: BigDecimal,
    pub recent_escrow_debonding_balance: BigDecimal,
    pub first_height: BlockHeight,
    pub first_time: NaiveDateTime,
    pub recent_height: BlockHeight,
    pub recent_time: NaiveDateTime,
}
