use async_trait::async_trait;
use bigdecimal::BigDecimal;
use shared::block::BlockSeq;
use shared::event::{
    BalanceEvent, BalanceEventKind, EscrowEventKind, RawEscrowEvent,
};
use shared::staking::{DebondingDelegationSeq, DelegationSeq, StakingSeq};
use shared::transaction::TransactionSeq;
use shared::validator::ValidatorSeq;

use crate::pipeline::payload::{ParsedValidator, Payload, PayloadPatch};
use crate::pipeline::task::{AsFatalError, Task, TaskError};
use crate::tasks::{
    TASK_BALANCE_EVENT_SEQ_CREATOR, TASK_BLOCK_SEQ_CREATOR,
    TASK_DEBONDING_DELEGATION_SEQ_CREATOR, TASK_DELEGATION_SEQ_CREATOR,
    TASK_STAKING_SEQ_CREATOR, TASK_TRANSACTION_SEQ_CREATOR,
    TASK_VALIDATOR_SEQ_CREATOR,
};

pub struct BlockSeqCreator;

#[async_trait]
impl Task for BlockSeqCreator {
    fn name(&self) -> &'static str {
        TASK_BLOCK_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let time = payload.meta_time().into_fatal_error()?;

        Ok(PayloadPatch {
            block_seq: Some(BlockSeq {
                chain_id: payload.chain_id.clone(),
                height: payload.current_height,
                time,
                transactions_count: payload.parsed_block.transactions_count,
                proposer_entity_uid: payload
                    .parsed_block
                    .proposer_entity_uid
                    .clone(),
            }),
            ..Default::default()
        })
    }
}

pub struct TransactionSeqCreator;

#[async_trait]
impl Task for TransactionSeqCreator {
    fn name(&self) -> &'static str {
        TASK_TRANSACTION_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let time = payload.meta_time().into_fatal_error()?;

        let transaction_seqs = payload
            .raw_transactions
            .iter()
            .map(|raw| TransactionSeq {
                chain_id: payload.chain_id.clone(),
                height: payload.current_height,
                time,
                hash: raw.hash.clone(),
                public_key: raw.public_key.clone(),
                nonce: raw.nonce,
                method: raw.method.clone(),
                fee: raw.fee.clone(),
                gas_limit: raw.gas_limit,
                gas_price: raw.gas_price.clone(),
            })
            .collect();

        Ok(PayloadPatch {
            transaction_seqs: Some(transaction_seqs),
            ..Default::default()
        })
    }
}

pub struct StakingSeqCreator;

#[async_trait]
impl Task for StakingSeqCreator {
    fn name(&self) -> &'static str {
        TASK_STAKING_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let staking_state = match &payload.raw_staking_state {
            Some(state) => state,
            None => return Ok(PayloadPatch::default()),
        };
        let time = payload.meta_time().into_fatal_error()?;

        Ok(PayloadPatch {
            staking_seq: Some(StakingSeq {
                chain_id: payload.chain_id.clone(),
                height: payload.current_height,
                time,
                total_supply: staking_state.total_supply.clone(),
                common_pool: staking_state.common_pool.clone(),
            }),
            ..Default::default()
        })
    }
}

pub struct ValidatorSeqCreator;

#[async_trait]
impl Task for ValidatorSeqCreator {
    fn name(&self) -> &'static str {
        TASK_VALIDATOR_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let time = payload.meta_time().into_fatal_error()?;
        let fallback = ParsedValidator::default();

        let validator_seqs = payload
            .raw_validators
            .iter()
            .map(|raw| {
                let parsed = payload
                    .parsed_validators
                    .get(&raw.address)
                    .unwrap_or(&fallback);

                ValidatorSeq {
                    chain_id: payload.chain_id.clone(),
                    height: payload.current_height,
                    time,
                    entity_uid: raw.entity_uid.clone(),
                    node_uid: raw.node_uid.clone(),
                    consensus_uid: raw.consensus_uid.clone(),
                    address: raw.address.clone(),
                    voting_power: raw.voting_power,
                    total_shares: parsed.total_shares.clone(),
                    commission: raw.commission.clone(),
                    active_escrow_balance: parsed
                        .active_escrow_balance
                        .clone(),
                    proposed: parsed.proposed,
                    precommit_validated: parsed.precommit_validated,
                    precommit_block_id_flag: parsed.precommit_block_id_flag,
                    precommit_index: parsed.precommit_index,
                    rewards: parsed.rewards.clone(),
                }
            })
            .collect();

        Ok(PayloadPatch {
            validator_seqs: Some(validator_seqs),
            ..Default::default()
        })
    }
}

pub struct DelegationSeqCreator;

#[async_trait]
impl Task for DelegationSeqCreator {
    fn name(&self) -> &'static str {
        TASK_DELEGATION_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let staking_state = match &payload.raw_staking_state {
            Some(state) => state,
            None => return Ok(PayloadPatch::default()),
        };
        let time = payload.meta_time().into_fatal_error()?;

        let delegation_seqs = staking_state
            .delegations
            .iter()
            .map(|raw| DelegationSeq {
                chain_id: payload.chain_id.clone(),
                height: payload.current_height,
                time,
                validator_uid: raw.validator_uid.clone(),
                delegator_uid: raw.delegator_uid.clone(),
                shares: raw.shares.clone(),
            })
            .collect();

        Ok(PayloadPatch {
            delegation_seqs: Some(delegation_seqs),
            ..Default::default()
        })
    }
}

pub struct DebondingDelegationSeqCreator;

#[async_trait]
impl Task for DebondingDelegationSeqCreator {
    fn name(&self) -> &'static str {
        TASK_DEBONDING_DELEGATION_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let staking_state = match &payload.raw_staking_state {
            Some(state) => state,
            None => return Ok(PayloadPatch::default()),
        };
        let time = payload.meta_time().into_fatal_error()?;

        let debonding_delegation_seqs = staking_state
            .debonding_delegations
            .iter()
            .map(|raw| DebondingDelegationSeq {
                chain_id: payload.chain_id.clone(),
                height: payload.current_height,
                time,
                validator_uid: raw.validator_uid.clone(),
                delegator_uid: raw.delegator_uid.clone(),
                shares: raw.shares.clone(),
                debond_end: raw.debond_end,
            })
            .collect();

        Ok(PayloadPatch {
            debonding_delegation_seqs: Some(debonding_delegation_seqs),
            ..Default::default()
        })
    }
}

/// Maps escrow movements into balance events: common-pool additions are
/// rewards, self-additions are commission, takes are slashes.
pub struct BalanceEventSeqCreator;

fn balance_event_kind(
    event: &RawEscrowEvent,
    common_pool_address: &str,
) -> Option<BalanceEventKind> {
    match event.kind {
        EscrowEventKind::Add if event.owner == common_pool_address => {
            Some(BalanceEventKind::Reward)
        }
        EscrowEventKind::Add if event.owner == event.escrow => {
            Some(BalanceEventKind::Commission)
        }
        EscrowEventKind::Add => None,
        EscrowEventKind::Take => Some(BalanceEventKind::Slash),
        EscrowEventKind::Reclaim => None,
    }
}

#[async_trait]
impl Task for BalanceEventSeqCreator {
    fn name(&self) -> &'static str {
        TASK_BALANCE_EVENT_SEQ_CREATOR
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let time = payload.meta_time().into_fatal_error()?;

        let balance_events = payload
            .raw_escrow_events
            .iter()
            .filter(|event| event.amount > BigDecimal::from(0))
            .filter_map(|event| {
                balance_event_kind(event, &payload.common_pool_address).map(
                    |kind| {
                        // Rewards credit the escrow account; commission and
                        // slashes are booked against the owner.
                        let address = match kind {
                            BalanceEventKind::Reward => event.escrow.clone(),
                            _ => event.owner.clone(),
                        };
                        BalanceEvent {
                            height: payload.current_height,
                            time,
                            address,
                            escrow_address: event.escrow.clone(),
                            kind,
                            amount: event.amount.clone(),
                        }
                    },
                )
            })
            .collect();

        Ok(PayloadPatch {
            balance_events: Some(balance_events),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::event::EscrowEventKind;

    use super::*;

    fn payload_with_meta() -> Payload {
        let mut payload = Payload::new(7, 1, None);
        payload.chain_id = "chain-1".to_string();
        payload.time = Some(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        payload.common_pool_address = "common-pool".to_string();
        payload
    }

    fn escrow_event(
        kind: EscrowEventKind,
        owner: &str,
        escrow: &str,
        amount: i64,
    ) -> RawEscrowEvent {
        RawEscrowEvent {
            kind,
            owner: owner.to_string(),
            escrow: escrow.to_string(),
            amount: BigDecimal::from(amount),
        }
    }

    #[tokio::test]
    async fn balance_events_classify_escrow_movements() {
        let mut payload = payload_with_meta();
        payload.raw_escrow_events = vec![
            escrow_event(EscrowEventKind::Add, "common-pool", "v1", 50),
            escrow_event(EscrowEventKind::Add, "v1", "v1", 10),
            escrow_event(EscrowEventKind::Add, "delegator", "v1", 500),
            escrow_event(EscrowEventKind::Take, "v1", "v1", 25),
            escrow_event(EscrowEventKind::Reclaim, "delegator", "v1", 100),
        ];

        let patch = BalanceEventSeqCreator.run(&payload).await.unwrap();
        let events = patch.balance_events.unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, BalanceEventKind::Reward);
        assert_eq!(events[0].amount, BigDecimal::from(50));
        assert_eq!(events[1].kind, BalanceEventKind::Commission);
        assert_eq!(events[2].kind, BalanceEventKind::Slash);
    }

    #[tokio::test]
    async fn sequencers_stamp_chain_id_height_and_time() {
        let mut payload = payload_with_meta();
        payload.parsed_block.transactions_count = 4;

        let patch = BlockSeqCreator.run(&payload).await.unwrap();
        let block_seq = patch.block_seq.unwrap();

        assert_eq!(block_seq.chain_id, "chain-1");
        assert_eq!(block_seq.height, 7);
        assert_eq!(block_seq.time, payload.time.unwrap());
        assert_eq!(block_seq.transactions_count, 4);
    }

    #[tokio::test]
    async fn staking_sequencer_is_a_noop_without_staking_state() {
        let payload = payload_with_meta();

        let patch = StakingSeqCreator.run(&payload).await.unwrap();

        assert!(patch.staking_seq.is_none());
    }
}
