use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use shared::staking::StakingSeq;

use crate::schema::staking_sequences;

#[derive(Debug, Clone, AsChangeset, Insertable, Queryable, Selectable)]
#[diesel(table_name = staking_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StakingSeqDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub total_supply: BigDecimal,
    pub common_pool: BigDecimal,
}

pub type StakingSeqInsertDb = StakingSeqDb;

impl StakingSeqInsertDb {
    pub fn from_staking_seq(seq: StakingSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            total_supply: seq.total_supply,
            common_pool: seq.common_pool,
        }
    }
}

impl From<StakingSeqDb> for StakingSeq {
    fn from(db: StakingSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            total_supply: db.total_supply,
            common_pool: db.common_pool,
        }
    }
}
