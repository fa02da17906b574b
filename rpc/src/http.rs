use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::block::{
    BlockHeight, ChainConstants, ChainHead, ChainStatus, HeightMeta, RawBlock,
};
use shared::event::RawEscrowEvent;
use shared::staking::RawStakingState;
use shared::transaction::RawTransaction;
use shared::validator::RawValidator;

use crate::client::{
    BlockRpc, ChainRpc, EventRpc, StateRpc, TransactionRpc, ValidatorRpc,
};

/// JSON-over-HTTP client for the node proxy.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> anyhow::Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to query node proxy at {}", url))?
            .error_for_status()
            .with_context(|| format!("Node proxy returned error for {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

#[async_trait]
impl ChainRpc for HttpClient {
    async fn get_head(&self) -> anyhow::Result<ChainHead> {
        self.get_json("chain/head").await
    }

    async fn get_status(&self) -> anyhow::Result<ChainStatus> {
        self.get_json("chain/status").await
    }

    async fn get_meta_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<HeightMeta> {
        self.get_json(&format!("chain/meta/{}", height)).await
    }

    async fn get_constants(&self) -> anyhow::Result<ChainConstants> {
        self.get_json("chain/constants").await
    }
}

#[async_trait]
impl BlockRpc for HttpClient {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock> {
        self.get_json(&format!("blocks/{}", height)).await
    }
}

#[async_trait]
impl TransactionRpc for HttpClient {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawTransaction>> {
        self.get_json(&format!("transactions/{}", height)).await
    }
}

#[async_trait]
impl ValidatorRpc for HttpClient {
    async fn get_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawValidator>> {
        self.get_json(&format!("validators/{}", height)).await
    }
}

#[async_trait]
impl StateRpc for HttpClient {
    async fn get_staking_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawStakingState> {
        self.get_json(&format!("staking/{}", height)).await
    }
}

#[async_trait]
impl EventRpc for HttpClient {
    async fn get_escrow_events_by_height(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<Vec<RawEscrowEvent>> {
        self.get_json(&format!("escrow_events/{}", height)).await
    }
}
