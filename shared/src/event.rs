use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowEventKind {
    Add,
    Take,
    Reclaim,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEscrowEvent {
    pub kind: EscrowEventKind,
    pub owner: String,
    pub escrow: String,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceEventKind {
    Reward,
    Commission,
    Slash,
}

impl std::fmt::Display for BalanceEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceEventKind::Reward => write!(f, "reward"),
            BalanceEventKind::Commission => write!(f, "commission"),
            BalanceEventKind::Slash => write!(f, "slash"),
        }
    }
}

/// Balance movement derived from an escrow event.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceEvent {
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub address: String,
    pub escrow_address: String,
    pub kind: BalanceEventKind,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventKind {
    JoinedSet,
}

impl std::fmt::Display for SystemEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemEventKind::JoinedSet => write!(f, "joined_set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemEvent {
    pub height: BlockHeight,
    pub time: NaiveDateTime,
    pub actor: String,
    pub kind: SystemEventKind,
    pub data: serde_json::Value,
}
