use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use rpc::{BlockRpc, EventRpc, StateRpc, TransactionRpc, ValidatorRpc};
use serde::de::DeserializeOwned;
use shared::syncable::SyncableKind;

use crate::pipeline::payload::{Payload, PayloadPatch};
use crate::pipeline::task::{
    AsFatalError, AsTransientError, Task, TaskError,
};
use crate::tasks::{
    TASK_BLOCK_FETCHER, TASK_ESCROW_EVENT_FETCHER, TASK_STAKING_STATE_FETCHER,
    TASK_TRANSACTION_FETCHER, TASK_VALIDATOR_FETCHER,
};

/// Raw data stored by a previous run of this height, if any. Lets a reindex
/// replay a height without asking the node again.
fn replay<T: DeserializeOwned>(
    payload: &Payload,
    kind: SyncableKind,
) -> Result<Option<T>, TaskError> {
    let stored = payload
        .syncables
        .iter()
        .find(|s| s.kind == kind)
        .and_then(|s| s.data.clone());

    match stored {
        None => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .with_context(|| format!("corrupt stored {} data", kind))
            .into_fatal_error(),
    }
}

pub struct BlockFetcher {
    client: Arc<dyn BlockRpc>,
}

impl BlockFetcher {
    pub fn new(client: Arc<dyn BlockRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Task for BlockFetcher {
    fn name(&self) -> &'static str {
        TASK_BLOCK_FETCHER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let raw_block = match replay(payload, SyncableKind::Block)? {
            Some(block) => block,
            None => self
                .client
                .get_by_height(payload.current_height)
                .await
                .into_transient_error()?,
        };

        Ok(PayloadPatch {
            raw_block: Some(raw_block),
            ..Default::default()
        })
    }
}

pub struct TransactionFetcher {
    client: Arc<dyn TransactionRpc>,
}

impl TransactionFetcher {
    pub fn new(client: Arc<dyn TransactionRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Task for TransactionFetcher {
    fn name(&self) -> &'static str {
        TASK_TRANSACTION_FETCHER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let raw_transactions =
            match replay(payload, SyncableKind::Transactions)? {
                Some(transactions) => transactions,
                None => self
                    .client
                    .get_by_height(payload.current_height)
                    .await
                    .into_transient_error()?,
            };

        Ok(PayloadPatch {
            raw_transactions: Some(raw_transactions),
            ..Default::default()
        })
    }
}

pub struct ValidatorFetcher {
    client: Arc<dyn ValidatorRpc>,
}

impl ValidatorFetcher {
    pub fn new(client: Arc<dyn ValidatorRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Task for ValidatorFetcher {
    fn name(&self) -> &'static str {
        TASK_VALIDATOR_FETCHER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let raw_validators = match replay(payload, SyncableKind::Validators)? {
            Some(validators) => validators,
            None => self
                .client
                .get_by_height(payload.current_height)
                .await
                .into_transient_error()?,
        };

        Ok(PayloadPatch {
            raw_validators: Some(raw_validators),
            ..Default::default()
        })
    }
}

pub struct StakingStateFetcher {
    client: Arc<dyn StateRpc>,
}

impl StakingStateFetcher {
    pub fn new(client: Arc<dyn StateRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Task for StakingStateFetcher {
    fn name(&self) -> &'static str {
        TASK_STAKING_STATE_FETCHER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let raw_staking_state = match replay(payload, SyncableKind::Staking)? {
            Some(state) => state,
            None => self
                .client
                .get_staking_by_height(payload.current_height)
                .await
                .into_transient_error()?,
        };

        Ok(PayloadPatch {
            raw_staking_state: Some(raw_staking_state),
            ..Default::default()
        })
    }
}

pub struct EscrowEventFetcher {
    client: Arc<dyn EventRpc>,
}

impl EscrowEventFetcher {
    pub fn new(client: Arc<dyn EventRpc>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Task for EscrowEventFetcher {
    fn name(&self) -> &'static str {
        TASK_ESCROW_EVENT_FETCHER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let raw_escrow_events =
            match replay(payload, SyncableKind::EscrowEvents)? {
                Some(events) => events,
                None => self
                    .client
                    .get_escrow_events_by_height(payload.current_height)
                    .await
                    .into_transient_error()?,
            };

        Ok(PayloadPatch {
            raw_escrow_events: Some(raw_escrow_events),
            ..Default::default()
        })
    }
}
