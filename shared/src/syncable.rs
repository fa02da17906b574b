use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

/// One upstream resource fetched for one height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncableKind {
    Block,
    Transactions,
    Validators,
    Staking,
    EscrowEvents,
}

impl SyncableKind {
    pub fn all() -> [SyncableKind; 5] {
        [
            SyncableKind::Block,
            SyncableKind::Transactions,
            SyncableKind::Validators,
            SyncableKind::Staking,
            SyncableKind::EscrowEvents,
        ]
    }
}

impl std::fmt::Display for SyncableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncableKind::Block => write!(f, "block"),
            SyncableKind::Transactions => write!(f, "transactions"),
            SyncableKind::Validators => write!(f, "validators"),
            SyncableKind::Staking => write!(f, "staking"),
            SyncableKind::EscrowEvents => write!(f, "escrow_events"),
        }
    }
}

/// Raw-data record for a single (height, kind) pair. The raw blob is kept so
/// a reindex can replay the height without re-fetching it from the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Syncable {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub kind: SyncableKind,
    pub data: Option<serde_json::Value>,
    pub index_version: i64,
    pub report_id: Option<i64>,
    pub processed_at: Option<NaiveDateTime>,
}

impl Syncable {
    pub fn mark_processed(&mut self, index_version: i64, now: NaiveDateTime) {
        self.index_version = index_version;
        self.processed_at = Some(now);
    }
}
