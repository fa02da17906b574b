use chrono::NaiveDateTime;
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use shared::syncable::{Syncable, SyncableKind};

use crate::schema::syncables;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    diesel_derive_enum::DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::SyncableKind"]
pub enum SyncableKindDb {
    Block,
    Transactions,
    Validators,
    Staking,
    EscrowEvents,
}

impl From<SyncableKind> for SyncableKindDb {
    fn from(value: SyncableKind) -> Self {
        match value {
            SyncableKind::Block => Self::Block,
            SyncableKind::Transactions => Self::Transactions,
            SyncableKind::Validators => Self::Validators,
            SyncableKind::Staking => Self::Staking,
            SyncableKind::EscrowEvents => Self::EscrowEvents,
        }
    }
}

impl From<SyncableKindDb> for SyncableKind {
    fn from(value: SyncableKindDb) -> Self {
        match value {
            SyncableKindDb::Block => Self::Block,
            SyncableKindDb::Transactions => Self::Transactions,
            SyncableKindDb::Validators => Self::Validators,
            SyncableKindDb::Staking => Self::Staking,
            SyncableKindDb::EscrowEvents => Self::EscrowEvents,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = syncables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SyncableDb {
    pub id: i64,
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub kind: SyncableKindDb,
    pub data: Option<serde_json::Value>,
    pub index_version: i64,
    pub report_id: Option<i64>,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = syncables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SyncableInsertDb {
    pub chain_id: String,
    pub height: i64,
    pub time: NaiveDateTime,
    pub kind: SyncableKindDb,
    pub data: Option<serde_json::Value>,
    pub index_version: i64,
    pub report_id: Option<i64>,
    pub processed_at: Option<NaiveDateTime>,
}

impl SyncableInsertDb {
    pub fn from_syncable(syncable: Syncable) -> Self {
        Self {
            chain_id: syncable.chain_id,
            height: syncable.height,
            time: syncable.time,
            kind: syncable.kind.into(),
            data: syncable.data,
            index_version: syncable.index_version,
            report_id: syncable.report_id,
            processed_at: syncable.processed_at,
        }
    }
}

impl From<SyncableDb> for Syncable {
    fn from(db: SyncableDb) -> Self {
        Self {
            chain_id: db.chain_id,
            height: db.height,
            time: db.time,
            kind: db.kind.into(),
            data: db.data,
            index_version: db.index_version,
            report_id: db.report_id,
            processed_at: db.processed_at,
        }
    }
}
