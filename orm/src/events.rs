use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use shared::event::{BalanceEvent, BalanceEventKind, SystemEvent, SystemEventKind};

use crate::schema::{balance_events, system_events};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    diesel_derive_enum::DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::BalanceEventKind"]
pub enum BalanceEventKindDb {
    Reward,
    Commission,
    Slash,
}

impl From<BalanceEventKind> for BalanceEventKindDb {
    fn from(value: BalanceEventKind) -> Self {
        match value {
            BalanceEventKind::Reward => Self::Reward,
            BalanceEventKind::Commission => Self::Commission,
            BalanceEventKind::Slash => Self::Slash,
        }
    }
}

impl From<BalanceEventKindDb> for BalanceEventKind {
    fn from(value: BalanceEventKindDb) -> Self {
        match value {
            BalanceEventKindDb::Reward => Self::Reward,
            BalanceEventKindDb::Commission => Self::Commission,
            BalanceEventKindDb::Slash => Self::Slash,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    diesel_derive_enum::DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::SystemEventKind"]
pub enum SystemEventKindDb {
    JoinedSet,
}

impl From<SystemEventKind> for SystemEventKindDb {
    fn from(value: SystemEventKind) -> Self {
        match value {
            SystemEventKind::JoinedSet => Self::JoinedSet,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = balance_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BalanceEventDb {
    pub id: i64,
    pub height: i64,
    pub time: NaiveDateTime,
    pub address: String,
    pub escrow_address: String,
    pub kind: BalanceEventKindDb,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = balance_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BalanceEventInsertDb {
    pub height: i64,
    pub time: NaiveDateTime,
    pub address: String,
    pub escrow_address: String,
    pub kind: BalanceEventKindDb,
    pub amount: BigDecimal,
}

impl BalanceEventInsertDb {
    pub fn from_balance_event(event: BalanceEvent) -> Self {
        Self {
            height: event.height,
            time: event.time,
            address: event.address,
            escrow_address: event.escrow_address,
            kind: event.kind.into(),
            amount: event.amount,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = system_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SystemEventDb {
    pub id: i64,
    pub height: i64,
    pub time: NaiveDateTime,
    pub actor: String,
    pub kind: SystemEventKindDb,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = system_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SystemEventInsertDb {
    pub height: i64,
    pub time: NaiveDateTime,
    pub actor: String,
    pub kind: SystemEventKindDb,
    pub data: serde_json::Value,
}

impl SystemEventInsertDb {
    pub fn from_system_event(event: SystemEvent) -> Self {
        Self {
            height: event.height,
            time: event.time,
            actor: event.actor,
            kind: event.kind.into(),
            data: event.data,
        }
    }
}
