use orm::accounts::AccountAggDb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    pub public_key: String,
    pub recent_general_balance: String,
    pub recent_escrow_active_balance: String,
    pub recent_escrow_debonding_balance: String,
    pub first_height: i64,
    pub first_time: String,
    pub recent_height: i64,
    pub recent_time: String,
}

impl From<AccountAggDb> for Account {
    fn from(agg_db: AccountAggDb) -> Self {
        Self {
            public_key: agg_db.public_key,
            recent_general_balance: agg_db.recent_general_balance.to_string(),
            recent_escrow_active_balance: agg_db
                .recent_escrow_active_balance
                .to_string(),
            recent_escrow_debonding_balance: agg_db
                .recent_escrow_debonding_balance
                .to_string(),
            first_height: agg_db.first_height,
            first_time: agg_db.first_time.and_utc().to_rfc3339(),
            recent_height: agg_db.recent_height,
            recent_time: agg_db.recent_time.and_utc().to_rfc3339(),
        }
    }
}
