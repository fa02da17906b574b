use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use shared::transaction::TransactionSeq;

use crate::schema::transaction_sequences;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transaction_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionSeqDb {
    pub id: i64,
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub hash: String,
    pub public_key: String,
    pub nonce: i64,
    pub method: String,
    pub fee: BigDecimal,
    pub gas_limit: i64,
    pub gas_price: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transaction_sequences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionSeqInsertDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub hash: String,
    pub public_key: String,
    pub nonce: i64,
    pub method: String,
    pub fee: BigDecimal,
    pub gas_limit: i64,
    pub gas_price: BigDecimal,
}

impl TransactionSeqInsertDb {
    pub fn from_transaction_seq(seq: TransactionSeq) -> Self {
        Self {
            chain_id: seq.chain_id,
            height: seq.height,
            time: seq.time,
            hash: seq.hash,
            public_key: seq.public_key,
            nonce: seq.nonce,
            method: seq.method,
            fee: seq.fee,
            gas_limit: seq.gas_limit,
            gas_price: seq.gas_price,
        }
    }
}

impl From<TransactionSeqDb> for TransactionSeq {
    fn from(db: TransactionSeqDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            hash: db.hash,
            public_key: db.public_key,
            nonce: db.nonce,
            method: db.method,
            fee: db.fee,
            gas_limit: db.gas_limit,
            gas_price: db.gas_price,
        }
    }
}
