use std::sync::Arc;

use chrono::NaiveDateTime;
use orm::summaries::{
    BalanceSummaryInsertDb, BalanceSummaryUpdateDb, BlockSummaryInsertDb,
    BlockSummaryUpdateDb, ValidatorSummaryInsertDb, ValidatorSummaryUpdateDb,
};
use shared::summary::{ActivityPeriod, SummaryInterval};

use crate::app_state::AppState;
use crate::metrics::{Timer, INDEXER_METRICS};
use crate::repository::{self, StoreError};
use crate::tasks::with_db;

/// Where to restart summarization. Buckets before the newest covered bucket
/// are closed and already converged; the newest one may still be partial.
fn resummarize_cutoff(
    activity_periods: &[ActivityPeriod],
) -> Option<NaiveDateTime> {
    activity_periods.last().map(|p| p.period_end)
}

/// Rebuilds hourly and daily rollups from sequences and balance events.
/// Idempotent: re-running converges to the same rows.
pub struct SummarizeUseCase {
    app_state: Arc<AppState>,
    index_version: i64,
}

impl SummarizeUseCase {
    pub fn new(app_state: Arc<AppState>, index_version: i64) -> Self {
        Self {
            app_state,
            index_version,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let _timer = Timer::new(&INDEXER_METRICS.use_case_duration);

        self.summarize_block_seqs(SummaryInterval::Hourly).await?;
        self.summarize_block_seqs(SummaryInterval::Daily).await?;
        self.summarize_validator_seqs(SummaryInterval::Hourly)
            .await?;
        self.summarize_validator_seqs(SummaryInterval::Daily).await?;
        self.summarize_balance_events(SummaryInterval::Daily).await?;

        Ok(())
    }

    async fn summarize_block_seqs(
        &self,
        interval: SummaryInterval,
    ) -> anyhow::Result<()> {
        tracing::info!(%interval, "summarizing block sequences");

        let index_version = self.index_version;
        let (created, updated) = with_db(&self.app_state, move |conn| {
            let activity_periods =
                repository::summary::block_summary_activity_periods(
                    conn,
                    interval,
                    index_version,
                )?;
            let cutoff = resummarize_cutoff(&activity_periods);
            let raw_rows =
                repository::block::summarize(conn, interval, cutoff)?;

            let mut created = 0_i64;
            let mut updated = 0_i64;
            for raw in raw_rows {
                match repository::summary::find_block_summary(
                    conn,
                    interval,
                    raw.time_bucket,
                    index_version,
                ) {
                    Ok(existing) => {
                        repository::summary::update_block_summary(
                            conn,
                            existing.id,
                            BlockSummaryUpdateDb {
                                count: raw.count,
                                block_time_avg: raw.block_time_avg,
                            },
                        )?;
                        updated += 1;
                    }
                    Err(StoreError::NotFound) => {
                        repository::summary::create_block_summary(
                            conn,
                            BlockSummaryInsertDb {
                                time_interval: interval.into(),
                                time_bucket: raw.time_bucket,
                                index_version,
                                count: raw.count,
                                block_time_avg: raw.block_time_avg,
                            },
                        )?;
                        created += 1;
                    }
                    Err(other) => return Err(other),
                }
            }
            Ok((created, updated))
        })
        .await?;

        tracing::info!(%interval, created, updated, "block sequences summarized");

        Ok(())
    }

    async fn summarize_validator_seqs(
        &self,
        interval: SummaryInterval,
    ) -> anyhow::Result<()> {
        tracing::info!(%interval, "summarizing validator sequences");

        let index_version = self.index_version;
        let (created, updated) = with_db(&self.app_state, move |conn| {
            let activity_periods =
                repository::summary::validator_summary_activity_periods(
                    conn,
                    interval,
                    index_version,
                )?;
            let cutoff = resummarize_cutoff(&activity_periods);
            let raw_rows = repository::validator::summarize_seqs(
                conn, interval, cutoff,
            )?;

            let mut created = 0_i64;
            let mut updated = 0_i64;
            for raw in raw_rows {
                match repository::summary::find_validator_summary(
                    conn,
                    interval,
                    raw.time_bucket,
                    index_version,
                    &raw.address,
                ) {
                    Ok(existing) => {
                        repository::summary::update_validator_summary(
                            conn,
                            existing.id,
                            ValidatorSummaryUpdateDb {
                                voting_power_avg: raw.voting_power_avg,
                                voting_power_max: raw.voting_power_max,
                                voting_power_min: raw.voting_power_min,
                                total_shares_avg: raw.total_shares_avg,
                                total_shares_max: raw.total_shares_max,
                                total_shares_min: raw.total_shares_min,
                                active_escrow_balance_avg: raw
                                    .active_escrow_balance_avg,
                                active_escrow_balance_max: raw
                                    .active_escrow_balance_max,
                                active_escrow_balance_min: raw
                                    .active_escrow_balance_min,
                                commission_avg: raw.commission_avg,
                                commission_max: raw.commission_max,
                                commission_min: raw.commission_min,
                                validated_sum: raw.validated_sum,
                                not_validated_sum: raw.not_validated_sum,
                                proposed_sum: raw.proposed_sum,
                                uptime_avg: raw.uptime_avg,
                                rewards_sum: raw.rewards_sum,
                            },
                        )?;
                        updated += 1;
                    }
                    Err(StoreError::NotFound) => {
                        repository::summary::create_validator_summary(
                            conn,
                            ValidatorSummaryInsertDb {
                                time_interval: interval.into(),
                                time_bucket: raw.time_bucket,
                                index_version,
                                address: raw.address,
                                voting_power_avg: raw.voting_power_avg,
                                voting_power_max: raw.voting_power_max,
                                voting_power_min: raw.voting_power_min,
                                total_shares_avg: raw.total_shares_avg,
                                total_shares_max: raw.total_shares_max,
                                total_shares_min: raw.total_shares_min,
                                active_escrow_balance_avg: raw
                                    .active_escrow_balance_avg,
                                active_escrow_balance_max: raw
                                    .active_escrow_balance_max,
                                active_escrow_balance_min: raw
                                    .active_escrow_balance_min,
                                commission_avg: raw.commission_avg,
                                commission_max: raw.commission_max,
                                commission_min: raw.commission_min,
                                validated_sum: raw.validated_sum,
                                not_validated_sum: raw.not_validated_sum,
                                proposed_sum: raw.proposed_sum,
                                uptime_avg: raw.uptime_avg,
                                rewards_sum: raw.rewards_sum,
                            },
                        )?;
                        created += 1;
                    }
                    Err(other) => return Err(other),
                }
            }
            Ok((created, updated))
        })
        .await?;

        tracing::info!(
            %interval,
            created,
            updated,
            "validator sequences summarized"
        );

        Ok(())
    }

    async fn summarize_balance_events(
        &self,
        interval: SummaryInterval,
    ) -> anyhow::Result<()> {
        tracing::info!(%interval, "summarizing balance events");

        let index_version = self.index_version;
        let (created, updated) = with_db(&self.app_state, move |conn| {
            let activity_periods =
                repository::summary::balance_summary_activity_periods(
                    conn,
                    interval,
                    index_version,
                )?;
            let cutoff = resummarize_cutoff(&activity_periods);
            let raw_rows = repository::event::summarize_balance_events(
                conn, interval, cutoff,
            )?;

            let mut created = 0_i64;
            let mut updated = 0_i64;
            for raw in raw_rows {
                match repository::summary::find_balance_summary(
                    conn,
                    interval,
                    raw.time_bucket,
                    index_version,
                    &raw.address,
                    &raw.escrow_address,
                ) {
                    Ok(existing) => {
                        repository::summary::update_balance_summary(
                            conn,
                            existing.id,
                            BalanceSummaryUpdateDb {
                                total_rewards: raw.total_rewards,
                                total_commission: raw.total_commission,
                                total_slashed: raw.total_slashed,
                            },
                        )?;
                        updated += 1;
                    }
                    Err(StoreError::NotFound) => {
                        repository::summary::create_balance_summary(
                            conn,
                            BalanceSummaryInsertDb {
                                time_interval: interval.into(),
                                time_bucket: raw.time_bucket,
                                index_version,
                                address: raw.address,
                                escrow_address: raw.escrow_address,
                                total_rewards: raw.total_rewards,
                                total_commission: raw.total_commission,
                                total_slashed: raw.total_slashed,
                            },
                        )?;
                        created += 1;
                    }
                    Err(other) => return Err(other),
                }
            }
            Ok((created, updated))
        })
        .await?;

        tracing::info!(%interval, created, updated, "balance events summarized");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn bucket(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn cutoff_is_the_newest_covered_bucket() {
        let periods = vec![
            ActivityPeriod {
                period_start: bucket(1, 0),
                period_end: bucket(1, 5),
            },
            ActivityPeriod {
                period_start: bucket(2, 3),
                period_end: bucket(2, 9),
            },
        ];

        assert_eq!(resummarize_cutoff(&periods), Some(bucket(2, 9)));
    }

    #[test]
    fn no_coverage_means_summarize_everything() {
        assert_eq!(resummarize_cutoff(&[]), None);
    }
}
