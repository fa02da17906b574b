use std::ops::RangeInclusive;

use shared::block::BlockHeight;
use shared::error::ContextDbInteractError;

use crate::app_state::AppState;
use crate::repository::{self, StoreError};

/// Inclusive range of heights one pipeline invocation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightWindow {
    pub start_height: BlockHeight,
    pub end_height: BlockHeight,
}

impl HeightWindow {
    pub fn is_empty(&self) -> bool {
        self.end_height < self.start_height
    }

    pub fn len(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.end_height - self.start_height + 1
        }
    }

    pub fn heights(&self) -> RangeInclusive<BlockHeight> {
        self.start_height..=self.end_height
    }
}

/// Forward window: resumes right after the last processed height and never
/// runs past the node head or the batch size. A head below the start yields
/// an empty window.
pub fn forward_window(
    configured_start: BlockHeight,
    last_processed: Option<BlockHeight>,
    head: BlockHeight,
    batch_size: i64,
) -> HeightWindow {
    let start_height = match last_processed {
        Some(height) => configured_start.max(height + 1),
        None => configured_start,
    };
    let end_height = head.min(start_height + batch_size - 1);

    HeightWindow {
        start_height,
        end_height,
    }
}

pub async fn forward_source(
    app_state: &AppState,
    client: &rpc::Client,
    configured_start: BlockHeight,
    batch_size: i64,
) -> anyhow::Result<HeightWindow> {
    let head = client.chain.get_head().await?;

    let conn = app_state.get_db_connection().await?;
    let last_processed = conn
        .interact(repository::syncable::find_most_recent_height)
        .await
        .context_db_interact_error()?;

    let last_processed = match last_processed {
        Ok(height) => Some(height),
        Err(StoreError::NotFound) => None,
        Err(other) => return Err(other.into()),
    };

    Ok(forward_window(
        configured_start,
        last_processed,
        head.height,
        batch_size,
    ))
}

/// Backfill window: the contiguous range of heights stored at a different
/// index version. `None` means everything is already at the current version.
pub async fn backfill_source(
    app_state: &AppState,
    index_version: i64,
) -> anyhow::Result<Option<HeightWindow>> {
    let conn = app_state.get_db_connection().await?;

    let range = conn
        .interact(move |conn| {
            let first =
                repository::syncable::first_height_with_different_index_version(
                    conn,
                    index_version,
                )?;
            let last =
                repository::syncable::most_recent_height_with_different_index_version(
                    conn,
                    index_version,
                )?;
            Ok::<_, StoreError>((first, last))
        })
        .await
        .context_db_interact_error()?;

    match range {
        Ok((start_height, end_height)) => Ok(Some(HeightWindow {
            start_height,
            end_height,
        })),
        Err(StoreError::NotFound) => Ok(None),
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_window_resumes_after_last_processed() {
        let window = forward_window(1, Some(50), 200, 10);

        assert_eq!(
            window,
            HeightWindow {
                start_height: 51,
                end_height: 60
            }
        );
    }

    #[test]
    fn forward_window_respects_configured_start() {
        let window = forward_window(100, Some(50), 200, 10);

        assert_eq!(window.start_height, 100);
        assert_eq!(window.end_height, 109);
    }

    #[test]
    fn forward_window_is_clamped_by_head() {
        let window = forward_window(1, Some(50), 55, 10);

        assert_eq!(window.start_height, 51);
        assert_eq!(window.end_height, 55);
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn forward_window_is_empty_when_head_is_behind() {
        let window = forward_window(100, None, 60, 10);

        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
    }
}
