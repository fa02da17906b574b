use std::str::FromStr;

use shared::summary::SummaryInterval;

use crate::appstate::AppState;
use crate::error::block::BlockError;
use crate::repository::block::{BlockRepository, BlockRepositoryTrait};
use crate::response::block::{Block, BlockTimeBucket, BlockTimes};

#[derive(Clone)]
pub struct BlockService {
    block_repo: BlockRepository,
}

impl BlockService {
    pub fn new(app_state: AppState) -> Self {
        Self {
            block_repo: BlockRepository::new(app_state),
        }
    }

    pub async fn get_block_by_height(
        &self,
        height: i64,
    ) -> Result<Block, BlockError> {
        let block = self
            .block_repo
            .find_block_by_height(height)
            .await
            .map_err(BlockError::Database)?
            .map(Block::from);

        block.ok_or(BlockError::NotFound(
            "height".to_string(),
            height.to_string(),
        ))
    }

    pub async fn get_block_times(
        &self,
        limit: i64,
    ) -> Result<BlockTimes, BlockError> {
        let row = self
            .block_repo
            .find_block_times(limit)
            .await
            .map_err(BlockError::Database)?;

        Ok(BlockTimes::from(row))
    }

    pub async fn get_block_times_for_interval(
        &self,
        interval: String,
    ) -> Result<Vec<BlockTimeBucket>, BlockError> {
        let interval = SummaryInterval::from_str(&interval)
            .map_err(BlockError::InvalidInterval)?;

        let summaries = self
            .block_repo
            .find_block_summaries(interval.into())
            .await
            .map_err(BlockError::Database)?;

        Ok(summaries.into_iter().map(BlockTimeBucket::from).collect())
    }
}
