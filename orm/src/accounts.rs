use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use shared::account::AccountAgg;

use crate::schema::account_aggregates;

#[derive(Debug, Clone, Insertable, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = account_aggregates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountAggDb {
    pub public_key: String,
    pub recent_general_balance: BigDecimal,
    pub recent_escrow_active_balance: BigDecimal,
    pub recent_escrow_debonding_balance: BigDecimal,
    pub first_height: i64,
    pub first_time: NaiveDateTime,
    pub recent_height: i64,
    pub recent_time: NaiveDateTime,
}

pub type AccountAggInsertDb = AccountAggDb;

impl AccountAggInsertDb {
    pub fn from_account_agg(agg: AccountAgg) -> Self {
        Self {
            public_key: agg.public_key,
            recent_general_balance: agg.recent_general_balance,
            recent_escrow_active_balance: agg.recent_escrow_active_balance,
            recent_escrow_debonding_balance: agg
                .recent_escrow_debonding_balance,
            first_height: agg.first_height,
            first_time: agg.first_time,
            recent_height: agg.recent_height,
            recent_time: agg.recent_time,
        }
    }
}

impl From<AccountAggDb> for AccountAgg {
    fn from(db: AccountAggDb) -> Self {
        Self {
            public_key: db.public_key,
            recent_general_balance: db.recent_general_balance,
            recent_escrow_active_balance: db.recent_escrow_active_balance,
            recent_escrow_debonding_balance: db
                .recent_escrow_debonding_balance,
            first_height: db.first_height,
            first_time: db.first_time,
            recent_height: db.recent_height,
            recent_time: db.recent_time,
        }
    }
}
