use async_trait::async_trait;
use bigdecimal::BigDecimal;
use shared::block::{BLOCK_ID_FLAG_ABSENT, BLOCK_ID_FLAG_COMMIT};
use shared::event::EscrowEventKind;

use crate::pipeline::payload::{
    ParsedBlock, ParsedValidator, ParsedValidators, Payload, PayloadPatch,
};
use crate::pipeline::task::{Task, TaskError};
use crate::tasks::{TASK_BLOCK_PARSER, TASK_VALIDATORS_PARSER};

/// Derives block-level facts from the raw block and transaction list.
pub struct BlockParser;

#[async_trait]
impl Task for BlockParser {
    fn name(&self) -> &'static str {
        TASK_BLOCK_PARSER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let mut parsed_block = ParsedBlock {
            transactions_count: payload.raw_transactions.len() as i64,
            proposer_entity_uid: String::new(),
        };

        if let Some(raw_block) = &payload.raw_block {
            if let Some(proposer) = payload.raw_validators.iter().find(|v| {
                v.tendermint_address == raw_block.header.proposer_address
            }) {
                parsed_block.proposer_entity_uid = proposer.entity_uid.clone();
            }
        }

        Ok(PayloadPatch {
            parsed_block: Some(parsed_block),
            ..Default::default()
        })
    }
}

/// Derives per-validator facts: precommit state, proposer flag, delegated
/// shares and the reward paid out of the common pool this height.
pub struct ValidatorsParser;

#[async_trait]
impl Task for ValidatorsParser {
    fn name(&self) -> &'static str {
        TASK_VALIDATORS_PARSER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let mut parsed_validators = ParsedValidators::new();

        for (index, validator) in payload.raw_validators.iter().enumerate() {
            let mut parsed = ParsedValidator {
                proposed: false,
                precommit_validated: None,
                precommit_block_id_flag: BLOCK_ID_FLAG_ABSENT,
                precommit_index: index as i64,
                total_shares: BigDecimal::from(0),
                active_escrow_balance: BigDecimal::from(0),
                rewards: BigDecimal::from(0),
            };

            if let Some(raw_block) = &payload.raw_block {
                // Votes are positional: vote i belongs to validator i. A
                // shorter vote list leaves the tail validators unknown.
                if let Some(vote) = raw_block.last_commit.votes.get(index) {
                    parsed.precommit_block_id_flag = vote.block_id_flag;
                    parsed.precommit_validated =
                        Some(vote.block_id_flag == BLOCK_ID_FLAG_COMMIT);
                }

                parsed.proposed = validator.tendermint_address
                    == raw_block.header.proposer_address;
            }

            if let Some(staking_state) = &payload.raw_staking_state {
                parsed.total_shares = staking_state
                    .delegations
                    .iter()
                    .filter(|d| d.validator_uid == validator.address)
                    .map(|d| d.shares.clone())
                    .sum();

                if let Some(account) = staking_state
                    .accounts
                    .iter()
                    .find(|a| a.address == validator.address)
                {
                    parsed.active_escrow_balance =
                        account.escrow_active_balance.clone();
                }
            }

            let reward = payload
                .raw_escrow_events
                .iter()
                .filter(|e| {
                    e.kind == EscrowEventKind::Add
                        && e.owner == payload.common_pool_address
                        && e.escrow == validator.address
                })
                .map(|e| e.amount.clone())
                .max();
            if let Some(reward) = reward {
                parsed.rewards = reward;
            }

            parsed_validators.insert(validator.address.clone(), parsed);
        }

        Ok(PayloadPatch {
            parsed_validators: Some(parsed_validators),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use shared::block::{RawBlock, RawBlockHeader, RawCommit, RawVote};
    use shared::event::RawEscrowEvent;
    use shared::staking::{RawAccount, RawDelegation, RawStakingState};
    use shared::transaction::RawTransaction;
    use shared::validator::RawValidator;

    use super::*;

    fn validator(address: &str, tendermint_address: &str) -> RawValidator {
        RawValidator {
            address: address.to_string(),
            entity_uid: format!("{}-entity", address),
            node_uid: format!("{}-node", address),
            consensus_uid: format!("{}-consensus", address),
            tendermint_address: tendermint_address.to_string(),
            voting_power: 100,
            commission: BigDecimal::from(0),
        }
    }

    fn block(proposer_address: &str, votes: Vec<RawVote>) -> RawBlock {
        RawBlock {
            header: RawBlockHeader {
                height: 10,
                proposer_address: proposer_address.to_string(),
            },
            last_commit: RawCommit { votes },
        }
    }

    fn vote(validator_index: i64, block_id_flag: i64) -> RawVote {
        RawVote {
            validator_index,
            block_id_flag,
        }
    }

    fn add_escrow(owner: &str, escrow: &str, amount: i64) -> RawEscrowEvent {
        RawEscrowEvent {
            kind: EscrowEventKind::Add,
            owner: owner.to_string(),
            escrow: escrow.to_string(),
            amount: BigDecimal::from(amount),
        }
    }

    async fn parse(payload: &Payload) -> ParsedValidators {
        let patch = ValidatorsParser.run(payload).await.unwrap();
        patch.parsed_validators.unwrap()
    }

    #[tokio::test]
    async fn block_parser_counts_transactions_and_resolves_proposer() {
        let mut payload = Payload::new(10, 1, None);
        payload.raw_block = Some(block("prop-addr", vec![]));
        payload.raw_transactions =
            vec![RawTransaction::default(), RawTransaction::default()];
        payload.raw_validators = vec![
            validator("v1", "other-addr"),
            validator("v2", "prop-addr"),
        ];

        let patch = BlockParser.run(&payload).await.unwrap();
        let parsed = patch.parsed_block.unwrap();

        assert_eq!(parsed.transactions_count, 2);
        assert_eq!(parsed.proposer_entity_uid, "v2-entity");
    }

    #[tokio::test]
    async fn block_parser_leaves_proposer_empty_when_absent_from_validators() {
        let mut payload = Payload::new(10, 1, None);
        payload.raw_block = Some(block("p", vec![]));
        payload.raw_validators =
            vec![validator("v1", "a1"), validator("v2", "a2")];

        let patch = BlockParser.run(&payload).await.unwrap();
        let parsed = patch.parsed_block.unwrap();

        assert_eq!(parsed.proposer_entity_uid, "");
        assert_eq!(parsed.transactions_count, 0);
    }

    #[tokio::test]
    async fn fewer_votes_than_validators_leaves_the_tail_unknown() {
        let mut payload = Payload::new(10, 1, None);
        payload.raw_block = Some(block("t0-tm", vec![vote(0, 2)]));
        payload.raw_validators =
            vec![validator("t0", "t0-tm"), validator("t1", "t1-tm")];

        let parsed = parse(&payload).await;

        assert_eq!(
            parsed["t0"],
            ParsedValidator {
                proposed: true,
                precommit_validated: Some(true),
                precommit_block_id_flag: 2,
                precommit_index: 0,
                total_shares: BigDecimal::from(0),
                active_escrow_balance: BigDecimal::from(0),
                rewards: BigDecimal::from(0),
            }
        );
        assert_eq!(
            parsed["t1"],
            ParsedValidator {
                proposed: false,
                precommit_validated: None,
                precommit_block_id_flag: 3,
                precommit_index: 1,
                total_shares: BigDecimal::from(0),
                active_escrow_balance: BigDecimal::from(0),
                rewards: BigDecimal::from(0),
            }
        );
    }

    #[tokio::test]
    async fn non_commit_votes_are_not_validated() {
        let mut payload = Payload::new(10, 1, None);
        payload.raw_block =
            Some(block("t1-tm", vec![vote(0, 2), vote(1, 2), vote(2, 1)]));
        payload.raw_validators = vec![
            validator("t0", "t0-tm"),
            validator("t1", "t1-tm"),
            validator("t2", "t2-tm"),
        ];

        let parsed = parse(&payload).await;

        assert_eq!(parsed["t0"].precommit_validated, Some(true));
        assert_eq!(parsed["t1"].precommit_validated, Some(true));
        assert!(parsed["t1"].proposed);
        assert_eq!(parsed["t2"].precommit_validated, Some(false));
        assert_eq!(parsed["t2"].precommit_block_id_flag, 1);
    }

    #[tokio::test]
    async fn total_shares_sums_delegations_owned_by_the_validator() {
        let mut payload = Payload::new(10, 1, None);
        payload.raw_block = Some(block("t0-tm", vec![]));
        payload.raw_validators =
            vec![validator("t0", "t0-tm"), validator("t1", "t1-tm")];
        payload.raw_staking_state = Some(RawStakingState {
            delegations: vec![
                RawDelegation {
                    validator_uid: "t0".to_string(),
                    delegator_uid: "d1".to_string(),
                    shares: BigDecimal::from(100),
                },
                RawDelegation {
                    validator_uid: "t0".to_string(),
                    delegator_uid: "d2".to_string(),
                    shares: BigDecimal::from(100),
                },
                RawDelegation {
                    validator_uid: "t1".to_string(),
                    delegator_uid: "d1".to_string(),
                    shares: BigDecimal::from(100),
                },
            ],
            accounts: vec![RawAccount {
                address: "t0".to_string(),
                general_balance: BigDecimal::from(5),
                escrow_active_balance: BigDecimal::from(700),
                escrow_debonding_balance: BigDecimal::from(0),
            }],
            ..Default::default()
        });

        let parsed = parse(&payload).await;

        assert_eq!(parsed["t0"].total_shares, BigDecimal::from(200));
        assert_eq!(parsed["t1"].total_shares, BigDecimal::from(100));
        assert_eq!(
            parsed["t0"].active_escrow_balance,
            BigDecimal::from(700)
        );
        assert_eq!(parsed["t1"].active_escrow_balance, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn rewards_take_the_maximum_common_pool_escrow_event() {
        let mut payload = Payload::new(10, 1, None);
        payload.common_pool_address = "common-pool".to_string();
        payload.raw_validators =
            vec![validator("t0", "t0-tm"), validator("t1", "t1-tm")];
        payload.raw_escrow_events = vec![
            add_escrow("common-pool", "t0", 20),
            add_escrow("common-pool", "t0", 100),
            add_escrow("common-pool", "t1", 100),
            add_escrow("common-pool", "t1", 20),
        ];

        let parsed = parse(&payload).await;

        assert_eq!(parsed["t0"].rewards, BigDecimal::from(100));
        assert_eq!(parsed["t1"].rewards, BigDecimal::from(100));
    }

    #[tokio::test]
    async fn rewards_ignore_events_from_other_owners() {
        let mut payload = Payload::new(10, 1, None);
        payload.common_pool_address = "common-pool".to_string();
        payload.raw_validators =
            vec![validator("t0", "t0-tm"), validator("t1", "t1-tm")];
        payload.raw_escrow_events = vec![
            add_escrow("not-common-pool", "t0", 100),
            add_escrow("common-pool", "t1", 100),
        ];

        let parsed = parse(&payload).await;

        assert_eq!(parsed["t0"].rewards, BigDecimal::from(0));
        assert_eq!(parsed["t1"].rewards, BigDecimal::from(100));
    }
}
