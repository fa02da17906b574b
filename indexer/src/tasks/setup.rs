use std::sync::Arc;

use async_trait::async_trait;
use rpc::ChainRpc;

use crate::pipeline::payload::{Payload, PayloadPatch};
use crate::pipeline::task::{AsTransientError, Task, TaskError};
use crate::tasks::TASK_HEIGHT_META_RETRIEVER;

/// Seeds the payload with the height's chain id, time and the chain's
/// common-pool address.
pub struct HeightMetaRetriever {
    chain: Arc<dyn ChainRpc>,
}

impl HeightMetaRetriever {
    pub fn new(chain: Arc<dyn ChainRpc>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Task for HeightMetaRetriever {
    fn name(&self) -> &'static str {
        TASK_HEIGHT_META_RETRIEVER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let meta = self
            .chain
            .get_meta_by_height(payload.current_height)
            .await
            .into_transient_error()?;
        let constants =
            self.chain.get_constants().await.into_transient_error()?;

        Ok(PayloadPatch {
            height_meta: Some(meta),
            common_pool_address: Some(constants.common_pool_address),
            ..Default::default()
        })
    }
}
