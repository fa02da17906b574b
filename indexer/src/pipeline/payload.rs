use std::collections::BTreeMap;
use std::time::Instant;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use shared::account::AccountAgg;
use shared::block::{BlockHeight, BlockSeq, HeightMeta, RawBlock};
use shared::event::{BalanceEvent, RawEscrowEvent, SystemEvent};
use shared::staking::{
    DebondingDelegationSeq, DelegationSeq, RawStakingState, StakingSeq,
};
use shared::syncable::Syncable;
use shared::transaction::{RawTransaction, TransactionSeq};
use shared::validator::{RawValidator, ValidatorAgg, ValidatorSeq};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBlock {
    pub transactions_count: i64,
    pub proposer_entity_uid: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValidator {
    pub proposed: bool,
    pub precommit_validated: Option<bool>,
    pub precommit_block_id_flag: i64,
    pub precommit_index: i64,
    pub total_shares: BigDecimal,
    pub active_escrow_balance: BigDecimal,
    pub rewards: BigDecimal,
}

/// Keyed by validator address.
pub type ParsedValidators = BTreeMap<String, ParsedValidator>;

/// Per-height scratch state threaded through one pipeline run. Each field is
/// written by exactly one stage; async tasks contribute through patches.
pub struct Payload {
    pub current_height: BlockHeight,
    pub index_version: i64,
    pub report_id: Option<i64>,
    pub started_at: Instant,

    // setup
    pub chain_id: String,
    pub time: Option<NaiveDateTime>,
    pub common_pool_address: String,

    // syncer
    pub syncables: Vec<Syncable>,

    // fetcher
    pub raw_block: Option<RawBlock>,
    pub raw_transactions: Vec<RawTransaction>,
    pub raw_validators: Vec<RawValidator>,
    pub raw_staking_state: Option<RawStakingState>,
    pub raw_escrow_events: Vec<RawEscrowEvent>,

    // parser
    pub parsed_block: ParsedBlock,
    pub parsed_validators: ParsedValidators,

    // sequencer
    pub block_seq: Option<BlockSeq>,
    pub transaction_seqs: Vec<TransactionSeq>,
    pub staking_seq: Option<StakingSeq>,
    pub validator_seqs: Vec<ValidatorSeq>,
    pub delegation_seqs: Vec<DelegationSeq>,
    pub debonding_delegation_seqs: Vec<DebondingDelegationSeq>,
    pub balance_events: Vec<BalanceEvent>,

    // aggregator
    pub account_aggs: Vec<AccountAgg>,
    pub validator_aggs: Vec<ValidatorAgg>,
    pub system_events: Vec<SystemEvent>,
}

impl Payload {
    pub fn new(
        current_height: BlockHeight,
        index_version: i64,
        report_id: Option<i64>,
    ) -> Self {
        Self {
            current_height,
            index_version,
            report_id,
            started_at: Instant::now(),
            chain_id: String::new(),
            time: None,
            common_pool_address: String::new(),
            syncables: Vec::new(),
            raw_block: None,
            raw_transactions: Vec::new(),
            raw_validators: Vec::new(),
            raw_staking_state: None,
            raw_escrow_events: Vec::new(),
            parsed_block: ParsedBlock::default(),
            parsed_validators: ParsedValidators::new(),
            block_seq: None,
            transaction_seqs: Vec::new(),
            staking_seq: None,
            validator_seqs: Vec::new(),
            delegation_seqs: Vec::new(),
            debonding_delegation_seqs: Vec::new(),
            balance_events: Vec::new(),
            account_aggs: Vec::new(),
            validator_aggs: Vec::new(),
            system_events: Vec::new(),
        }
    }

    /// Merges a task's contribution into the payload.
    pub fn apply(&mut self, patch: PayloadPatch) {
        if let Some(meta) = patch.height_meta {
            self.chain_id = meta.chain_id;
            self.time = Some(meta.time);
        }
        if let Some(address) = patch.common_pool_address {
            self.common_pool_address = address;
        }
        if let Some(syncables) = patch.syncables {
            self.syncables = syncables;
        }
        if let Some(raw_block) = patch.raw_block {
            self.raw_block = Some(raw_block);
        }
        if let Some(raw_transactions) = patch.raw_transactions {
            self.raw_transactions = raw_transactions;
        }
        if let Some(raw_validators) = patch.raw_validators {
            self.raw_validators = raw_validators;
        }
        if let Some(raw_staking_state) = patch.raw_staking_state {
            self.raw_staking_state = Some(raw_staking_state);
        }
        if let Some(raw_escrow_events) = patch.raw_escrow_events {
            self.raw_escrow_events = raw_escrow_events;
        }
        if let Some(parsed_block) = patch.parsed_block {
            self.parsed_block = parsed_block;
        }
        if let Some(parsed_validators) = patch.parsed_validators {
            self.parsed_validators = parsed_validators;
        }
        if let Some(block_seq) = patch.block_seq {
            self.block_seq = Some(block_seq);
        }
        if let Some(transaction_seqs) = patch.transaction_seqs {
            self.transaction_seqs = transaction_seqs;
        }
        if let Some(staking_seq) = patch.staking_seq {
            self.staking_seq = Some(staking_seq);
        }
        if let Some(validator_seqs) = patch.validator_seqs {
            self.validator_seqs = validator_seqs;
        }
        if let Some(delegation_seqs) = patch.delegation_seqs {
            self.delegation_seqs = delegation_seqs;
        }
        if let Some(debonding_delegation_seqs) =
            patch.debonding_delegation_seqs
        {
            self.debonding_delegation_seqs = debonding_delegation_seqs;
        }
        if let Some(balance_events) = patch.balance_events {
            self.balance_events = balance_events;
        }
        if let Some(account_aggs) = patch.account_aggs {
            self.account_aggs = account_aggs;
        }
        if let Some(validator_aggs) = patch.validator_aggs {
            self.validator_aggs = validator_aggs;
        }
        if let Some(system_events) = patch.system_events {
            self.system_events = system_events;
        }
    }

    /// Block time seeded by the setup stage, required by every sequencer.
    pub fn meta_time(&self) -> anyhow::Result<NaiveDateTime> {
        self.time
            .ok_or_else(|| anyhow::anyhow!("payload is missing height meta"))
    }
}

/// Contribution of a single task. Every slot mirrors a payload field owned by
/// the task that produces it.
#[derive(Default)]
pub struct PayloadPatch {
    pub height_meta: Option<HeightMeta>,
    pub common_pool_address: Option<String>,
    pub syncables: Option<Vec<Syncable>>,
    pub raw_block: Option<RawBlock>,
    pub raw_transactions: Option<Vec<RawTransaction>>,
    pub raw_validators: Option<Vec<RawValidator>>,
    pub raw_staking_state: Option<RawStakingState>,
    pub raw_escrow_events: Option<Vec<RawEscrowEvent>>,
    pub parsed_block: Option<ParsedBlock>,
    pub parsed_validators: Option<ParsedValidators>,
    pub block_seq: Option<BlockSeq>,
    pub transaction_seqs: Option<Vec<TransactionSeq>>,
    pub staking_seq: Option<StakingSeq>,
    pub validator_seqs: Option<Vec<ValidatorSeq>>,
    pub delegation_seqs: Option<Vec<DelegationSeq>>,
    pub debonding_delegation_seqs: Option<Vec<DebondingDelegationSeq>>,
    pub balance_events: Option<Vec<BalanceEvent>>,
    pub account_aggs: Option<Vec<AccountAgg>>,
    pub validator_aggs: Option<Vec<ValidatorAgg>>,
    pub system_events: Option<Vec<SystemEvent>>,
}

/// Yields a fresh payload per height.
pub struct PayloadFactory {
    index_version: i64,
    report_id: Option<i64>,
}

impl PayloadFactory {
    pub fn new(index_version: i64, report_id: Option<i64>) -> Self {
        Self {
            index_version,
            report_id,
        }
    }

    pub fn get(&self, height: BlockHeight) -> Payload {
        Payload::new(height, self.index_version, self.report_id)
    }
}
