use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use shared::block::BlockSeq;

use crate::schema::block_sequences;

#[derive(Debug, Clone, AsChangeset, Insertable, Queryable, Selectable)]
#[diesel(table_name = block_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockSeqDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub transactions_count: i64,
    pub proposer_entity_uid: String,
}

pub type BlockSeqInsertDb = BlockSeqDb;

impl BlockSeqInsertDb {
    pub fn from_block_seq(seq: BlockSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            transactions_count: seq.transactions_count,
            proposer_entity_uid: seq.proposer_entity_uid,
        }
    }
}

impl From<BlockSeqDb> for BlockSeq {
    fn from(db: BlockSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            transactions_count: db.transactions_count,
            proposer_entity_uid: db.proposer_entity_uid,
        }
    }
}
