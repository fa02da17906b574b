use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use orm::accounts::AccountAggInsertDb;
use orm::blocks::BlockSeqInsertDb;
use orm::delegations::{
    DebondingDelegationSeqInsertDb, DelegationSeqInsertDb,
};
use orm::events::{BalanceEventInsertDb, SystemEventInsertDb};
use orm::staking::StakingSeqInsertDb;
use orm::syncables::SyncableInsertDb;
use orm::transactions::TransactionSeqInsertDb;
use orm::validators::{ValidatorAggInsertDb, ValidatorSeqInsertDb};
use shared::syncable::SyncableKind;

use crate::app_state::AppState;
use crate::pipeline::payload::{Payload, PayloadPatch};
use crate::pipeline::task::{
    AsFatalError, AsTransientError, Task, TaskError,
};
use crate::repository;
use crate::tasks::{
    with_db, TASK_ACCOUNT_AGG_PERSISTOR, TASK_BLOCK_SEQ_PERSISTOR,
    TASK_DELEGATION_SEQ_PERSISTOR, TASK_EVENT_PERSISTOR,
    TASK_STAKING_SEQ_PERSISTOR, TASK_SYNCER_PERSISTOR,
    TASK_TRANSACTION_SEQ_PERSISTOR, TASK_VALIDATOR_AGG_PERSISTOR,
    TASK_VALIDATOR_SEQ_PERSISTOR,
};

/// Writes the height's syncable rows, embedding each resource's raw blob so
/// later reindex runs replay from the store.
pub struct SyncerPersistor {
    app_state: Arc<AppState>,
}

impl SyncerPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    fn raw_data_for(
        payload: &Payload,
        kind: SyncableKind,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let data = match kind {
            SyncableKind::Block => payload
                .raw_block
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
            SyncableKind::Transactions => {
                if payload.raw_transactions.is_empty() {
                    None
                } else {
                    Some(serde_json::to_value(&payload.raw_transactions)?)
                }
            }
            SyncableKind::Validators => {
                if payload.raw_validators.is_empty() {
                    None
                } else {
                    Some(serde_json::to_value(&payload.raw_validators)?)
                }
            }
            SyncableKind::Staking => payload
                .raw_staking_state
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
            SyncableKind::EscrowEvents => {
                if payload.raw_escrow_events.is_empty() {
                    None
                } else {
                    Some(serde_json::to_value(&payload.raw_escrow_events)?)
                }
            }
        };
        Ok(data)
    }
}

#[async_trait]
impl Task for SyncerPersistor {
    fn name(&self) -> &'static str {
        TASK_SYNCER_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let mut rows = Vec::with_capacity(payload.syncables.len());
        for syncable in &payload.syncables {
            let mut syncable = syncable.clone();
            let fetched = Self::raw_data_for(payload, syncable.kind)
                .context("Failed to serialize raw data")
                .into_fatal_error()?;
            // A freshly fetched blob wins; otherwise keep the stored one.
            if fetched.is_some() {
                syncable.data = fetched;
            }
            rows.push(SyncableInsertDb::from_syncable(syncable));
        }

        with_db(&self.app_state, move |conn| {
            for row in rows {
                repository::syncable::upsert(conn, row)?;
            }
            Ok(())
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct BlockSeqPersistor {
    app_state: Arc<AppState>,
}

impl BlockSeqPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for BlockSeqPersistor {
    fn name(&self) -> &'static str {
        TASK_BLOCK_SEQ_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let block_seq = match &payload.block_seq {
            Some(seq) => seq.clone(),
            None => return Ok(PayloadPatch::default()),
        };

        with_db(&self.app_state, move |conn| {
            repository::block::upsert(
                conn,
                BlockSeqInsertDb::from_block_seq(block_seq),
            )
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct TransactionSeqPersistor {
    app_state: Arc<AppState>,
}

impl TransactionSeqPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for TransactionSeqPersistor {
    fn name(&self) -> &'static str {
        TASK_TRANSACTION_SEQ_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        if payload.transaction_seqs.is_empty() {
            return Ok(PayloadPatch::default());
        }
        let rows: Vec<TransactionSeqInsertDb> = payload
            .transaction_seqs
            .iter()
            .cloned()
            .map(TransactionSeqInsertDb::from_transaction_seq)
            .collect();

        with_db(&self.app_state, move |conn| {
            repository::transaction::insert_seqs(conn, &rows)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct StakingSeqPersistor {
    app_state: Arc<AppState>,
}

impl StakingSeqPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for StakingSeqPersistor {
    fn name(&self) -> &'static str {
        TASK_STAKING_SEQ_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let staking_seq = match &payload.staking_seq {
            Some(seq) => seq.clone(),
            None => return Ok(PayloadPatch::default()),
        };

        with_db(&self.app_state, move |conn| {
            repository::staking::upsert(
                conn,
                StakingSeqInsertDb::from_staking_seq(staking_seq),
            )
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct ValidatorSeqPersistor {
    app_state: Arc<AppState>,
}

impl ValidatorSeqPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for ValidatorSeqPersistor {
    fn name(&self) -> &'static str {
        TASK_VALIDATOR_SEQ_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        if payload.validator_seqs.is_empty() {
            return Ok(PayloadPatch::default());
        }
        let rows: Vec<ValidatorSeqInsertDb> = payload
            .validator_seqs
            .iter()
            .cloned()
            .map(ValidatorSeqInsertDb::from_validator_seq)
            .collect();

        with_db(&self.app_state, move |conn| {
            repository::validator::upsert_seqs(conn, &rows)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct DelegationSeqPersistor {
    app_state: Arc<AppState>,
}

impl DelegationSeqPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for DelegationSeqPersistor {
    fn name(&self) -> &'static str {
        TASK_DELEGATION_SEQ_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let delegations: Vec<DelegationSeqInsertDb> = payload
            .delegation_seqs
            .iter()
            .cloned()
            .map(DelegationSeqInsertDb::from_delegation_seq)
            .collect();
        let debonding: Vec<DebondingDelegationSeqInsertDb> = payload
            .debonding_delegation_seqs
            .iter()
            .cloned()
            .map(
                DebondingDelegationSeqInsertDb::from_debonding_delegation_seq,
            )
            .collect();

        if delegations.is_empty() && debonding.is_empty() {
            return Ok(PayloadPatch::default());
        }

        with_db(&self.app_state, move |conn| {
            if !delegations.is_empty() {
                repository::delegation::insert_seqs(conn, &delegations)?;
            }
            if !debonding.is_empty() {
                repository::delegation::insert_debonding_seqs(
                    conn, &debonding,
                )?;
            }
            Ok(())
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct ValidatorAggPersistor {
    app_state: Arc<AppState>,
}

impl ValidatorAggPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for ValidatorAggPersistor {
    fn name(&self) -> &'static str {
        TASK_VALIDATOR_AGG_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        if payload.validator_aggs.is_empty() {
            return Ok(PayloadPatch::default());
        }
        let rows: Vec<ValidatorAggInsertDb> = payload
            .validator_aggs
            .iter()
            .cloned()
            .map(ValidatorAggInsertDb::from_validator_agg)
            .collect();

        with_db(&self.app_state, move |conn| {
            repository::validator::upsert_aggs(conn, &rows)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

pub struct AccountAggPersistor {
    app_state: Arc<AppState>,
}

impl AccountAggPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for AccountAggPersistor {
    fn name(&self) -> &'static str {
        TASK_ACCOUNT_AGG_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        if payload.account_aggs.is_empty() {
            return Ok(PayloadPatch::default());
        }
        let rows: Vec<AccountAggInsertDb> = payload
            .account_aggs
            .iter()
            .cloned()
            .map(AccountAggInsertDb::from_account_agg)
            .collect();

        with_db(&self.app_state, move |conn| {
            repository::account::upsert_aggs(conn, &rows)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}

/// Writes the height's derived balance and system events.
pub struct EventPersistor {
    app_state: Arc<AppState>,
}

impl EventPersistor {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for EventPersistor {
    fn name(&self) -> &'static str {
        TASK_EVENT_PERSISTOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let balance_events: Vec<BalanceEventInsertDb> = payload
            .balance_events
            .iter()
            .cloned()
            .map(BalanceEventInsertDb::from_balance_event)
            .collect();
        let system_events: Vec<SystemEventInsertDb> = payload
            .system_events
            .iter()
            .cloned()
            .map(SystemEventInsertDb::from_system_event)
            .collect();

        if balance_events.is_empty() && system_events.is_empty() {
            return Ok(PayloadPatch::default());
        }

        with_db(&self.app_state, move |conn| {
            if !balance_events.is_empty() {
                repository::event::insert_balance_events(
                    conn,
                    &balance_events,
                )?;
            }
            if !system_events.is_empty() {
                repository::event::insert_system_events(
                    conn,
                    &system_events,
                )?;
            }
            Ok(())
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch::default())
    }
}
