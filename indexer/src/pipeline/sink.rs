use std::sync::Arc;

use chrono::Utc;
use shared::error::ContextDbInteractError;

use crate::app_state::AppState;
use crate::metrics::INDEXER_METRICS;
use crate::pipeline::payload::Payload;
use crate::pipeline::task::{AsTransientError, TaskError};
use crate::repository;

/// Records per-height success: stamps the height's syncables with the current
/// index version and a processed timestamp, then emits height metrics.
pub struct Sink {
    app_state: Arc<AppState>,
    index_version: i64,
    pub success_count: i64,
}

impl Sink {
    pub fn new(app_state: Arc<AppState>, index_version: i64) -> Self {
        Self {
            app_state,
            index_version,
            success_count: 0,
        }
    }

    pub async fn consume(&mut self, payload: &Payload) -> Result<(), TaskError> {
        let height = payload.current_height;
        let index_version = self.index_version;
        let now = Utc::now().naive_utc();

        let db_size = async {
            let conn = self.app_state.get_db_connection().await?;
            conn.interact(move |conn| {
                repository::syncable::mark_processed(
                    conn,
                    height,
                    index_version,
                    now,
                )?;
                repository::database::get_total_size(conn)
            })
            .await
            .context_db_interact_error()?
            .map_err(anyhow::Error::from)
        }
        .await
        .into_transient_error()?;

        INDEXER_METRICS.height_success.inc();
        INDEXER_METRICS
            .height_duration
            .observe(payload.started_at.elapsed().as_millis() as u64);
        INDEXER_METRICS.db_size_after_height.observe(db_size as u64);

        self.success_count += 1;

        tracing::info!(height, "processing completed [status=success]");

        Ok(())
    }
}
