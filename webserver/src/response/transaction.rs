use orm::transactions::TransactionSeqDb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Transaction {
    pub chain_id: String,
    pub height: i64,
    pub time: String,
    pub hash: String,
    pub public_key: String,
    pub nonce: i64,
    pub method: String,
    pub fee: String,
    pub gas_limit: i64,
    pub gas_price: String,
}

impl From<TransactionSeqDb> for Transaction {
    fn from(tx_db: TransactionSeqDb) -> Self {
        Self {
            chain_id: tx_db.chain_id,
            height: tx_db.height,
            time: tx_db.time.and_utc().to_rfc3339(),
            hash: tx_db.hash,
            public_key: tx_db.public_key,
            nonce: tx_db.nonce,
            method: tx_db.method,
            fee: tx_db.fee.to_string(),
            gas_limit: tx_db.gas_limit,
            gas_price: tx_db.gas_price.to_string(),
        }
    }
}
