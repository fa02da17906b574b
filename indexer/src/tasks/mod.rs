use diesel::PgConnection;
use shared::error::ContextDbInteractError;

use crate::app_state::AppState;
use crate::repository::StoreResult;

pub mod aggregator;
pub mod fetcher;
pub mod parser;
pub mod persistor;
pub mod sequencer;
pub mod setup;
pub mod syncer;

pub const TASK_HEIGHT_META_RETRIEVER: &str = "HeightMetaRetriever";
pub const TASK_MAIN_SYNCER: &str = "MainSyncer";
pub const TASK_BLOCK_FETCHER: &str = "BlockFetcher";
pub const TASK_TRANSACTION_FETCHER: &str = "TransactionFetcher";
pub const TASK_VALIDATOR_FETCHER: &str = "ValidatorFetcher";
pub const TASK_STAKING_STATE_FETCHER: &str = "StakingStateFetcher";
pub const TASK_ESCROW_EVENT_FETCHER: &str = "EscrowEventFetcher";
pub const TASK_BLOCK_PARSER: &str = "BlockParser";
pub const TASK_VALIDATORS_PARSER: &str = "ValidatorsParser";
pub const TASK_BLOCK_SEQ_CREATOR: &str = "BlockSeqCreator";
pub const TASK_TRANSACTION_SEQ_CREATOR: &str = "TransactionSeqCreator";
pub const TASK_STAKING_SEQ_CREATOR: &str = "StakingSeqCreator";
pub const TASK_VALIDATOR_SEQ_CREATOR: &str = "ValidatorSeqCreator";
pub const TASK_DELEGATION_SEQ_CREATOR: &str = "DelegationSeqCreator";
pub const TASK_DEBONDING_DELEGATION_SEQ_CREATOR: &str =
    "DebondingDelegationSeqCreator";
pub const TASK_BALANCE_EVENT_SEQ_CREATOR: &str = "BalanceEventSeqCreator";
pub const TASK_ACCOUNT_AGG_CREATOR: &str = "AccountAggCreator";
pub const TASK_VALIDATOR_AGG_CREATOR: &str = "ValidatorAggCreator";
pub const TASK_SYNCER_PERSISTOR: &str = "SyncerPersistor";
pub const TASK_BLOCK_SEQ_PERSISTOR: &str = "BlockSeqPersistor";
pub const TASK_TRANSACTION_SEQ_PERSISTOR: &str = "TransactionSeqPersistor";
pub const TASK_STAKING_SEQ_PERSISTOR: &str = "StakingSeqPersistor";
pub const TASK_VALIDATOR_SEQ_PERSISTOR: &str = "ValidatorSeqPersistor";
pub const TASK_DELEGATION_SEQ_PERSISTOR: &str = "DelegationSeqPersistor";
pub const TASK_VALIDATOR_AGG_PERSISTOR: &str = "ValidatorAggPersistor";
pub const TASK_ACCOUNT_AGG_PERSISTOR: &str = "AccountAggPersistor";
pub const TASK_EVENT_PERSISTOR: &str = "EventPersistor";

/// Runs a repository closure on a pooled connection, flattening pool and
/// store errors into one anyhow error.
pub(crate) async fn with_db<T, F>(
    app_state: &AppState,
    f: F,
) -> anyhow::Result<T>
where
    F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let conn = app_state.get_db_connection().await?;
    conn.interact(f)
        .await
        .context_db_interact_error()?
        .map_err(anyhow::Error::from)
}
