use std::sync::Arc;

use async_trait::async_trait;
use shared::block::{
    BlockHeight, ChainConstants, ChainHead, ChainStatus, HeightMeta, RawBlock,
};
use shared::event::RawEscrowEvent;
use shared::staking::RawStakingState;
use shared::transaction::RawTransaction;
use shared::validator::RawValidator;

#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_head(&self) -> anyhow::Result<ChainHead>;
    async fn get_status(&self) -> anyhow::Result<ChainStatus>;
    async fn get_meta_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<HeightMeta>;
    async fn get_constants(&self) -> anyhow::Result<ChainConstants>;
}

#[async_trait]
pub trait BlockRpc: Send + Sync {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock>;
}

#[async_trait]
pub trait TransactionRpc: Send + Sync {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawTransaction>>;
}

#[async_trait]
pub trait ValidatorRpc: Send + Sync {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawValidator>>;
}

#[async_trait]
pub trait StateRpc: Send + Sync {
    async fn get_staking_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawStakingState>;
}

#[async_trait]
pub trait EventRpc: Send + Sync {
    async fn get_escrow_events_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawEscrowEvent>>;
}

/// Per-resource handles to the node proxy, shared by all pipeline tasks.
#[derive(Clone)]
pub struct Client {
    pub chain: Arc<dyn ChainRpc>,
    pub block: Arc<dyn BlockRpc>,
    pub transaction: Arc<dyn TransactionRpc>,
    pub validator: Arc<dyn ValidatorRpc>,
    pub state: Arc<dyn StateRpc>,
    pub event: Arc<dyn EventRpc>,
}

impl Client {
    pub fn from_url(proxy_url: &str) -> Self {
        let http = Arc::new(crate::http::HttpClient::new(proxy_url));
        Self {
            chain: http.clone(),
            block: http.clone(),
            transaction: http.clone(),
            validator: http.clone(),
            state: http.clone(),
            event: http,
        }
    }
}
