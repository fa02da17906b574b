use std::sync::Arc;

use async_trait::async_trait;
use shared::account::AccountAgg;
use shared::event::{SystemEvent, SystemEventKind};
use shared::staking::RawAccount;
use shared::validator::{ValidatorAgg, ValidatorSeq};

use crate::app_state::AppState;
use crate::pipeline::payload::{Payload, PayloadPatch};
use crate::pipeline::task::{AsTransientError, Task, TaskError};
use crate::repository::{self, StoreError, StoreResult};
use crate::tasks::{
    with_db, TASK_ACCOUNT_AGG_CREATOR, TASK_VALIDATOR_AGG_CREATOR,
};

/// Folds a height's account state into the latest-known aggregate. `recent_*`
/// fields only move forward in height.
fn advance_account(
    existing: Option<AccountAgg>,
    raw: &RawAccount,
    height: i64,
    time: chrono::NaiveDateTime,
) -> AccountAgg {
    match existing {
        None => AccountAgg {
            public_key: raw.address.clone(),
            recent_general_balance: raw.general_balance.clone(),
            recent_escrow_active_balance: raw.escrow_active_balance.clone(),
            recent_escrow_debonding_balance: raw
                .escrow_debonding_balance
                .clone(),
            first_height: height,
            first_time: time,
            recent_height: height,
            recent_time: time,
        },
        Some(mut agg) => {
            if height > agg.recent_height {
                agg.recent_general_balance = raw.general_balance.clone();
                agg.recent_escrow_active_balance =
                    raw.escrow_active_balance.clone();
                agg.recent_escrow_debonding_balance =
                    raw.escrow_debonding_balance.clone();
                agg.recent_height = height;
                agg.recent_time = time;
            }
            agg
        }
    }
}

/// Folds a validator sequence into the latest-known aggregate. Returns the
/// merged row and whether the validator is new to the set.
fn advance_validator(
    existing: Option<ValidatorAgg>,
    seq: &ValidatorSeq,
    tendermint_address: &str,
) -> (ValidatorAgg, bool) {
    match existing {
        None => (
            ValidatorAgg {
                entity_uid: seq.entity_uid.clone(),
                recent_address: seq.address.clone(),
                recent_tendermint_address: tendermint_address.to_string(),
                recent_voting_power: seq.voting_power,
                recent_total_shares: seq.total_shares.clone(),
                first_height: seq.height,
                first_time: seq.time,
                recent_height: seq.height,
                recent_time: seq.time,
            },
            true,
        ),
        Some(mut agg) => {
            if seq.height > agg.recent_height {
                agg.recent_address = seq.address.clone();
                agg.recent_tendermint_address = tendermint_address.to_string();
                agg.recent_voting_power = seq.voting_power;
                agg.recent_total_shares = seq.total_shares.clone();
                agg.recent_height = seq.height;
                agg.recent_time = seq.time;
            }
            (agg, false)
        }
    }
}

pub struct AccountAggCreator {
    app_state: Arc<AppState>,
}

impl AccountAggCreator {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for AccountAggCreator {
    fn name(&self) -> &'static str {
        TASK_ACCOUNT_AGG_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let staking_state = match &payload.raw_staking_state {
            Some(state) => state,
            None => return Ok(PayloadPatch::default()),
        };

        let height = payload.current_height;
        let time = match payload.time {
            Some(time) => time,
            None => return Ok(PayloadPatch::default()),
        };
        let accounts = staking_state.accounts.clone();

        let account_aggs = with_db(&self.app_state, move |conn| {
            let mut aggs = Vec::with_capacity(accounts.len());
            for raw in &accounts {
                let existing = match repository::account::find_by_public_key(
                    conn,
                    &raw.address,
                ) {
                    Ok(agg) => Some(agg),
                    Err(StoreError::NotFound) => None,
                    Err(other) => return Err(other),
                };
                aggs.push(advance_account(existing, raw, height, time));
            }
            Ok(aggs)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch {
            account_aggs: Some(account_aggs),
            ..Default::default()
        })
    }
}

pub struct ValidatorAggCreator {
    app_state: Arc<AppState>,
}

impl ValidatorAggCreator {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for ValidatorAggCreator {
    fn name(&self) -> &'static str {
        TASK_VALIDATOR_AGG_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let seqs = payload.validator_seqs.clone();
        let tendermint_addresses: Vec<String> = payload
            .raw_validators
            .iter()
            .map(|v| v.tendermint_address.clone())
            .collect();

        let (validator_aggs, system_events) =
            with_db(&self.app_state, move |conn| {
                let mut aggs = Vec::with_capacity(seqs.len());
                let mut events = Vec::new();
                for (i, seq) in seqs.iter().enumerate() {
                    let existing =
                        match repository::validator::find_agg_by_entity_uid(
                            conn,
                            &seq.entity_uid,
                        ) {
                            Ok(agg) => Some(agg),
                            Err(StoreError::NotFound) => None,
                            Err(other) => return Err(other),
                        };

                    let tendermint_address = tendermint_addresses
                        .get(i)
                        .map(String::as_str)
                        .unwrap_or_default();
                    let (agg, is_new) =
                        advance_validator(existing, seq, tendermint_address);

                    if is_new {
                        events.push(SystemEvent {
                            height: seq.height,
                            time: seq.time,
                            actor: seq.entity_uid.clone(),
                            kind: SystemEventKind::JoinedSet,
                            data: serde_json::json!({
                                "address": seq.address,
                                "voting_power": seq.voting_power,
                            }),
                        });
                    }
                    aggs.push(agg);
                }
                StoreResult::Ok((aggs, events))
            })
            .await
            .into_transient_error()?;

        Ok(PayloadPatch {
            validator_aggs: Some(validator_aggs),
            system_events: Some(system_events),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    use super::*;

    fn seq(height: i64, proposed: bool, validated: Option<bool>) -> ValidatorSeq {
        ValidatorSeq {
            chain_id: "chain-1".to_string(),
            height,
            time: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            entity_uid: "entity-1".to_string(),
            node_uid: "node-1".to_string(),
            consensus_uid: "consensus-1".to_string(),
            address: "addr-1".to_string(),
            voting_power: 500,
            total_shares: BigDecimal::from(1000),
            commission: BigDecimal::from(0),
            active_escrow_balance: BigDecimal::from(0),
            proposed,
            precommit_validated: validated,
            precommit_block_id_flag: 2,
            precommit_index: 0,
            rewards: BigDecimal::from(0),
        }
    }

    #[test]
    fn first_sighting_creates_the_aggregate() {
        let (agg, is_new) = advance_validator(None, &seq(10, true, Some(true)), "tm-1");

        assert!(is_new);
        assert_eq!(agg.first_height, 10);
        assert_eq!(agg.recent_height, 10);
        assert_eq!(agg.recent_voting_power, 500);
    }

    #[test]
    fn higher_heights_advance_the_recent_snapshot() {
        let (agg, _) = advance_validator(None, &seq(10, true, Some(true)), "tm-1");
        let (agg, is_new) =
            advance_validator(Some(agg), &seq(11, false, Some(false)), "tm-2");

        assert!(!is_new);
        assert_eq!(agg.first_height, 10);
        assert_eq!(agg.recent_height, 11);
        assert_eq!(agg.recent_tendermint_address, "tm-2");
    }

    #[test]
    fn stale_heights_leave_the_aggregate_untouched() {
        let (agg, _) = advance_validator(None, &seq(10, false, Some(true)), "tm-1");
        let before = agg.clone();
        let (agg, _) = advance_validator(Some(agg), &seq(9, true, Some(true)), "tm-1");

        assert_eq!(agg, before);
    }

    #[test]
    fn accounts_only_advance_forward_in_height() {
        let raw = RawAccount {
            address: "acct-1".to_string(),
            general_balance: BigDecimal::from(100),
            escrow_active_balance: BigDecimal::from(50),
            escrow_debonding_balance: BigDecimal::from(0),
        };
        let time = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let agg = advance_account(None, &raw, 10, time);
        assert_eq!(agg.first_height, 10);

        let stale = RawAccount {
            general_balance: BigDecimal::from(1),
            ..raw.clone()
        };
        let agg = advance_account(Some(agg), &stale, 9, time);
        assert_eq!(agg.recent_general_balance, BigDecimal::from(100));
        assert_eq!(agg.recent_height, 10);
    }
}
