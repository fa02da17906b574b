use std::sync::Arc;

use async_trait::async_trait;
use shared::syncable::{Syncable, SyncableKind};

use crate::app_state::AppState;
use crate::pipeline::payload::{Payload, PayloadPatch};
use crate::pipeline::task::{
    AsFatalError, AsTransientError, Task, TaskError,
};
use crate::repository::{self, StoreError};
use crate::tasks::{with_db, TASK_MAIN_SYNCER};

/// Ensures a syncable row exists for every resource kind at the current
/// height and marks them unprocessed. Existing rows keep their raw data so a
/// reindex replays without re-fetching from the node.
pub struct MainSyncer {
    app_state: Arc<AppState>,
}

impl MainSyncer {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }
}

#[async_trait]
impl Task for MainSyncer {
    fn name(&self) -> &'static str {
        TASK_MAIN_SYNCER
    }

    async fn run(
        &self,
        payload: &Payload,
    ) -> Result<PayloadPatch, TaskError> {
        let height = payload.current_height;
        let time = payload.meta_time().into_fatal_error()?;
        let chain_id = payload.chain_id.clone();
        let report_id = payload.report_id;

        let syncables = with_db(&self.app_state, move |conn| {
            let mut syncables = Vec::with_capacity(SyncableKind::all().len());
            for kind in SyncableKind::all() {
                match repository::syncable::find_by_height_and_kind(
                    conn, height, kind,
                ) {
                    Ok(mut syncable) => {
                        syncable.report_id = report_id;
                        syncable.processed_at = None;
                        syncables.push(syncable);
                    }
                    Err(StoreError::NotFound) => syncables.push(Syncable {
                        chain_id: chain_id.clone(),
                        height,
                        time,
                        kind,
                        data: None,
                        // Stamped with the real version by the sink once the
                        // height fully persists.
                        index_version: 0,
                        report_id,
                        processed_at: None,
                    }),
                    Err(other) => return Err(other),
                }
            }
            Ok(syncables)
        })
        .await
        .into_transient_error()?;

        Ok(PayloadPatch {
            syncables: Some(syncables),
            ..Default::default()
        })
    }
}
