use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use shared::summary::SummaryInterval;

use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::metrics::{Timer, INDEXER_METRICS};
use crate::repository::{self, StoreError};
use crate::tasks::with_db;

/// Retention intervals in seconds; zero disables the corresponding step.
#[derive(Debug, Clone, Copy)]
pub struct PurgeConfig {
    pub sequences_interval: u64,
    pub hourly_summaries_interval: u64,
    pub system_events_interval: u64,
    pub balance_events_interval: u64,
}

impl PurgeConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            sequences_interval: cfg.purge_sequences_interval,
            hourly_summaries_interval: cfg.purge_hourly_summaries_interval,
            system_events_interval: cfg.purge_system_events_interval,
            balance_events_interval: cfg.purge_balance_events_interval,
        }
    }
}

fn retention(seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        None
    } else {
        Some(Duration::seconds(seconds as i64))
    }
}

/// Validator sequences must never outlive their summary coverage: the purge
/// threshold is clamped to the most recent summary bucket.
fn clamp_to_summary(
    threshold: NaiveDateTime,
    last_summary_bucket: NaiveDateTime,
) -> NaiveDateTime {
    threshold.min(last_summary_bucket)
}

/// Deletes sequences, summaries and events older than the configured
/// retention intervals, respecting summary coverage.
pub struct PurgeUseCase {
    app_state: Arc<AppState>,
    cfg: PurgeConfig,
    index_version: i64,
}

impl PurgeUseCase {
    pub fn new(
        app_state: Arc<AppState>,
        cfg: PurgeConfig,
        index_version: i64,
    ) -> Self {
        Self {
            app_state,
            cfg,
            index_version,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let _timer = Timer::new(&INDEXER_METRICS.use_case_duration);

        self.purge_block_sequences().await?;
        self.purge_block_summaries(SummaryInterval::Hourly).await?;
        self.purge_validator_sequences().await?;
        self.purge_validator_summaries(SummaryInterval::Hourly)
            .await?;
        self.purge_system_events().await?;
        self.purge_balance_events().await?;

        Ok(())
    }

    /// Runs one purge step, tolerating an empty store.
    async fn step(
        &self,
        what: &'static str,
        deleted: anyhow::Result<usize>,
    ) -> anyhow::Result<()> {
        match deleted {
            Ok(count) => {
                tracing::info!(count, "{} purged", what);
                Ok(())
            }
            Err(err) if is_not_found(&err) => {
                tracing::info!("no {} to purge yet", what);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn purge_block_sequences(&self) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.sequences_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    "purging block sequences disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let index_version = self.index_version;
        let deleted = with_db(&self.app_state, move |conn| {
            let most_recent = repository::block::find_most_recent(conn)?;
            let threshold = most_recent.time - retention;
            let activity_periods =
                repository::summary::block_summary_activity_periods(
                    conn,
                    SummaryInterval::Daily,
                    index_version,
                )?;

            repository::block::delete_older_than(
                conn,
                threshold,
                &activity_periods,
                Duration::days(1),
            )
        })
        .await;

        self.step("block sequences", deleted).await
    }

    async fn purge_validator_sequences(&self) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.sequences_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    "purging validator sequences disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let deleted = with_db(&self.app_state, move |conn| {
            let most_recent =
                repository::validator::find_most_recent_seq(conn)?;
            let last_summary_bucket =
                repository::summary::most_recent_validator_summary_bucket_any(
                    conn,
                )?;
            let threshold = clamp_to_summary(
                most_recent.time - retention,
                last_summary_bucket,
            );

            repository::validator::delete_seqs_older_than(conn, threshold)
        })
        .await;

        self.step("validator sequences", deleted).await
    }

    async fn purge_block_summaries(
        &self,
        interval: SummaryInterval,
    ) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.hourly_summaries_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    %interval,
                    "purging block summaries disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let deleted = with_db(&self.app_state, move |conn| {
            let last_bucket =
                repository::summary::most_recent_block_summary_bucket(
                    conn, interval,
                )?;
            let threshold = last_bucket - retention;

            repository::summary::delete_block_summaries_older_than(
                conn, interval, threshold,
            )
        })
        .await;

        self.step("block summaries", deleted).await
    }

    async fn purge_validator_summaries(
        &self,
        interval: SummaryInterval,
    ) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.hourly_summaries_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    %interval,
                    "purging validator summaries disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let deleted = with_db(&self.app_state, move |conn| {
            let last_bucket =
                repository::summary::most_recent_validator_summary_bucket(
                    conn, interval,
                )?;
            let threshold = last_bucket - retention;

            repository::summary::delete_validator_summaries_older_than(
                conn, interval, threshold,
            )
        })
        .await;

        self.step("validator summaries", deleted).await
    }

    async fn purge_system_events(&self) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.system_events_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    "purging system events disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let deleted = with_db(&self.app_state, move |conn| {
            let last_event_time =
                repository::event::most_recent_system_event_time(conn)?;
            let threshold = last_event_time - retention;

            repository::event::delete_system_events_older_than(
                conn, threshold,
            )
        })
        .await;

        self.step("system events", deleted).await
    }

    async fn purge_balance_events(&self) -> anyhow::Result<()> {
        let retention = match retention(self.cfg.balance_events_interval) {
            Some(retention) => retention,
            None => {
                tracing::info!(
                    "purging balance events disabled, interval set to 0"
                );
                return Ok(());
            }
        };

        let deleted = with_db(&self.app_state, move |conn| {
            let last_event_time =
                repository::event::most_recent_balance_event_time(conn)?;
            let threshold = last_event_time - retention;

            repository::event::delete_balance_events_older_than(
                conn, threshold,
            )
        })
        .await;

        self.step("balance events", deleted).await
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn zero_interval_disables_purging() {
        assert_eq!(retention(0), None);
        assert_eq!(retention(3600), Some(Duration::seconds(3600)));
    }

    #[test]
    fn threshold_never_passes_the_last_summary_bucket() {
        // Retention would allow deleting up to day 5, but summaries only
        // cover through day 3.
        assert_eq!(clamp_to_summary(ts(5, 0), ts(3, 0)), ts(3, 0));
        // Summaries are ahead of retention: retention wins.
        assert_eq!(clamp_to_summary(ts(2, 0), ts(3, 0)), ts(2, 0));
    }
}
