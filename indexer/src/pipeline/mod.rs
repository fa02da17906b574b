use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use orm::reports::ReportInsertDb;
use shared::report::{Report, ReportKind};

use crate::app_state::AppState;
use crate::metrics::INDEXER_METRICS;
use crate::repository::{self, StoreError};
use crate::targets::TargetCatalog;
use crate::tasks::aggregator::{AccountAggCreator, ValidatorAggCreator};
use crate::tasks::fetcher::{
    BlockFetcher, EscrowEventFetcher, StakingStateFetcher, TransactionFetcher,
    ValidatorFetcher,
};
use crate::tasks::parser::{BlockParser, ValidatorsParser};
use crate::tasks::persistor::{
    AccountAggPersistor, BlockSeqPersistor, DelegationSeqPersistor,
    EventPersistor, StakingSeqPersistor, SyncerPersistor,
    TransactionSeqPersistor, ValidatorAggPersistor, ValidatorSeqPersistor,
};
use crate::tasks::sequencer::{
    BalanceEventSeqCreator, BlockSeqCreator, DebondingDelegationSeqCreator,
    DelegationSeqCreator, StakingSeqCreator, TransactionSeqCreator,
    ValidatorSeqCreator,
};
use crate::tasks::setup::HeightMetaRetriever;
use crate::tasks::syncer::MainSyncer;
use crate::tasks::with_db;

pub mod payload;
pub mod report;
pub mod sink;
pub mod source;
pub mod stage;
pub mod task;

use payload::{Payload, PayloadFactory};
use report::{resolve_reindex_report, ReindexDecision};
use sink::Sink;
use source::HeightWindow;
use stage::{Stage, StageName};
use task::{RetryingTask, Task, TaskError};

pub struct PipelineOptions {
    pub task_whitelist: HashSet<String>,
    pub stages_blacklist: Vec<StageName>,
    pub report_id: Option<i64>,
}

pub struct StartConfig {
    pub batch_size: i64,
    pub start_height: i64,
}

pub struct BackfillConfig {
    pub parallel: bool,
    pub force: bool,
    pub target_ids: Vec<i64>,
}

pub struct RunConfig {
    pub height: i64,
    pub desired_target_id: i64,
    pub dry: bool,
}

pub struct IndexingPipeline {
    app_state: Arc<AppState>,
    client: rpc::Client,
    targets: TargetCatalog,
    stages: Vec<Stage>,
    shutdown: Arc<AtomicBool>,
}

fn retrying(task: impl Task + 'static) -> Box<dyn Task> {
    Box::new(RetryingTask::new(task))
}

fn build_stages(
    app_state: &Arc<AppState>,
    client: &rpc::Client,
) -> Vec<Stage> {
    vec![
        Stage::sync_runner(
            StageName::Setup,
            vec![retrying(HeightMetaRetriever::new(client.chain.clone()))],
        ),
        Stage::sync_runner(
            StageName::Syncer,
            vec![retrying(MainSyncer::new(app_state.clone()))],
        ),
        Stage::async_runner(
            StageName::Fetcher,
            vec![
                retrying(BlockFetcher::new(client.block.clone())),
                retrying(TransactionFetcher::new(client.transaction.clone())),
                retrying(ValidatorFetcher::new(client.validator.clone())),
                retrying(StakingStateFetcher::new(client.state.clone())),
                retrying(EscrowEventFetcher::new(client.event.clone())),
            ],
        ),
        Stage::async_runner(
            StageName::Parser,
            vec![Box::new(BlockParser), Box::new(ValidatorsParser)],
        ),
        Stage::async_runner(
            StageName::Sequencer,
            vec![
                retrying(BlockSeqCreator),
                retrying(TransactionSeqCreator),
                retrying(StakingSeqCreator),
                retrying(ValidatorSeqCreator),
                retrying(DelegationSeqCreator),
                retrying(DebondingDelegationSeqCreator),
                retrying(BalanceEventSeqCreator),
            ],
        ),
        Stage::async_runner(
            StageName::Aggregator,
            vec![
                retrying(AccountAggCreator::new(app_state.clone())),
                retrying(ValidatorAggCreator::new(app_state.clone())),
            ],
        ),
        Stage::async_runner(
            StageName::Persistor,
            vec![
                retrying(SyncerPersistor::new(app_state.clone())),
                retrying(BlockSeqPersistor::new(app_state.clone())),
                retrying(TransactionSeqPersistor::new(app_state.clone())),
                retrying(StakingSeqPersistor::new(app_state.clone())),
                retrying(ValidatorSeqPersistor::new(app_state.clone())),
                retrying(DelegationSeqPersistor::new(app_state.clone())),
                retrying(ValidatorAggPersistor::new(app_state.clone())),
                retrying(AccountAggPersistor::new(app_state.clone())),
                retrying(EventPersistor::new(app_state.clone())),
            ],
        ),
    ]
}

impl IndexingPipeline {
    pub fn new(
        targets_file: &str,
        app_state: Arc<AppState>,
        client: rpc::Client,
        shutdown: Arc<AtomicBool>,
    ) -> anyhow::Result<Self> {
        let targets = TargetCatalog::from_file(targets_file)?;
        let stages = build_stages(&app_state, &client);

        Ok(Self {
            app_state,
            client,
            targets,
            stages,
            shutdown,
        })
    }

    /// Forward run over the next window of heights.
    pub async fn start(&self, cfg: StartConfig) -> anyhow::Result<()> {
        let index_version = self.targets.current_version_id();

        let window = source::forward_source(
            &self.app_state,
            &self.client,
            cfg.start_height,
            cfg.batch_size,
        )
        .await?;

        let report = self
            .create_report(&window, ReportKind::Index, index_version)
            .await?;

        let options = PipelineOptions {
            task_whitelist: self.targets.all_tasks().into_iter().collect(),
            stages_blacklist: Vec::new(),
            report_id: Some(report.id),
        };

        tracing::info!(
            start = window.start_height,
            end = window.end_height,
            "starting pipeline"
        );

        let mut sink = Sink::new(self.app_state.clone(), index_version);
        let outcome = self
            .run_heights(&window, &options, &mut sink, index_version)
            .await;

        if outcome.is_err() {
            INDEXER_METRICS.total_errors.inc();
        }

        tracing::info!(err = ?outcome.as_ref().err(), "pipeline completed");

        self.complete_report(&report, window.len(), sink.success_count, &outcome)
            .await?;

        outcome
    }

    /// Reindex over heights stored at an older index version.
    pub async fn backfill(&self, cfg: BackfillConfig) -> anyhow::Result<()> {
        let index_version = self.targets.current_version_id();

        let window =
            match source::backfill_source(&self.app_state, index_version)
                .await?
            {
                Some(window) => window,
                None => {
                    tracing::info!(
                        index_version,
                        "nothing to reindex, all syncables are current"
                    );
                    return Ok(());
                }
            };

        let kind = if cfg.parallel {
            ReportKind::ParallelReindex
        } else {
            ReportKind::SequentialReindex
        };

        if cfg.force {
            let deleted = with_db(&self.app_state, |conn| {
                repository::report::delete_reindexing(conn)
            })
            .await?;
            tracing::info!(deleted, "deleted outstanding reindex reports");
        }

        let existing = match with_db(&self.app_state, move |conn| {
            repository::report::find_not_completed_reindex(conn, index_version)
        })
        .await
        {
            Ok(report) => Some(report),
            Err(err) if is_not_found(&err) => None,
            Err(err) => return Err(err),
        };

        let report = match resolve_reindex_report(existing, kind)? {
            ReindexDecision::Resume(report) => {
                tracing::info!(report_id = report.id, "resuming reindex report");
                report
            }
            ReindexDecision::Create => {
                self.create_report(&window, kind, index_version).await?
            }
        };

        let report_id = report.id;
        let (start_height, end_height) =
            (window.start_height, window.end_height);
        with_db(&self.app_state, move |conn| {
            repository::syncable::assign_report_and_clear_processed(
                conn,
                report_id,
                start_height,
                end_height,
            )
        })
        .await?;

        let options = PipelineOptions {
            task_whitelist: self
                .tasks_whitelist(&cfg.target_ids)?
                .into_iter()
                .collect(),
            stages_blacklist: Vec::new(),
            report_id: Some(report.id),
        };

        tracing::info!(
            start = window.start_height,
            end = window.end_height,
            kind = %kind,
            "starting pipeline backfill"
        );

        let mut sink = Sink::new(self.app_state.clone(), index_version);
        let outcome = self
            .run_heights(&window, &options, &mut sink, index_version)
            .await;

        if outcome.is_err() {
            INDEXER_METRICS.total_errors.inc();
        }

        self.complete_report(&report, window.len(), sink.success_count, &outcome)
            .await?;

        tracing::info!("pipeline backfill completed");

        outcome
    }

    /// One-shot run of a single height. `dry` blacklists the persistor stage
    /// so nothing is written.
    pub async fn run(&self, cfg: RunConfig) -> anyhow::Result<Payload> {
        let index_version = self.targets.current_version_id();

        let stages_blacklist = if cfg.dry {
            vec![StageName::Persistor]
        } else {
            Vec::new()
        };

        let options = PipelineOptions {
            task_whitelist: self
                .tasks_whitelist(&if cfg.desired_target_id > 0 {
                    vec![cfg.desired_target_id]
                } else {
                    Vec::new()
                })?
                .into_iter()
                .collect(),
            stages_blacklist,
            report_id: None,
        };

        tracing::info!(
            height = cfg.height,
            target_id = cfg.desired_target_id,
            dry = cfg.dry,
            "running pipeline"
        );

        let factory = PayloadFactory::new(index_version, None);
        match self.process_height(cfg.height, &factory, &options).await {
            Ok(payload) => {
                tracing::info!("pipeline completed successfully");
                Ok(payload)
            }
            Err(err) => {
                INDEXER_METRICS.total_errors.inc();
                Err(anyhow::Error::new(err)
                    .context(format!("height {} failed", cfg.height)))
            }
        }
    }

    fn tasks_whitelist(
        &self,
        target_ids: &[i64],
    ) -> anyhow::Result<Vec<String>> {
        if target_ids.is_empty() {
            Ok(self.targets.all_tasks())
        } else {
            Ok(self.targets.tasks_for_targets(target_ids)?)
        }
    }

    async fn run_heights(
        &self,
        window: &HeightWindow,
        options: &PipelineOptions,
        sink: &mut Sink,
        index_version: i64,
    ) -> anyhow::Result<()> {
        if window.is_empty() {
            return Ok(());
        }

        let factory = PayloadFactory::new(index_version, options.report_id);

        for height in window.heights() {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::info!(height, "shutdown requested, stopping source");
                break;
            }

            let payload = self
                .process_height(height, &factory, options)
                .await
                .map_err(anyhow::Error::new)
                .with_context(|| format!("height {} failed", height))?;

            sink.consume(&payload)
                .await
                .map_err(anyhow::Error::new)
                .with_context(|| format!("sink failed at height {}", height))?;
        }

        Ok(())
    }

    async fn process_height(
        &self,
        height: i64,
        factory: &PayloadFactory,
        options: &PipelineOptions,
    ) -> Result<Payload, TaskError> {
        let mut payload = factory.get(height);

        for stage in &self.stages {
            // Cancellation is checked between stages: the stage in flight
            // always finishes before the height is abandoned.
            if self.shutdown.load(Ordering::Relaxed) {
                return Err(TaskError::Fatal(anyhow::anyhow!(
                    "indexing interrupted by shutdown"
                )));
            }
            if options.stages_blacklist.contains(&stage.name()) {
                tracing::debug!(stage = %stage.name(), "stage blacklisted, skipping");
                continue;
            }
            stage.run(&mut payload, &options.task_whitelist).await?;
        }

        Ok(payload)
    }

    async fn create_report(
        &self,
        window: &HeightWindow,
        kind: ReportKind,
        index_version: i64,
    ) -> anyhow::Result<Report> {
        let insert = ReportInsertDb {
            kind: kind.into(),
            index_version,
            start_height: window.start_height,
            end_height: window.end_height,
            created_at: Utc::now().naive_utc(),
        };

        with_db(&self.app_state, move |conn| {
            repository::report::create(conn, insert)
        })
        .await
    }

    async fn complete_report(
        &self,
        report: &Report,
        total_count: i64,
        success_count: i64,
        outcome: &anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let report_id = report.id;
        let error_msg = outcome.as_ref().err().map(|e| format!("{:#}", e));
        let now = Utc::now().naive_utc();

        with_db(&self.app_state, move |conn| {
            repository::report::complete(
                conn,
                report_id,
                success_count,
                total_count - success_count,
                error_msg,
                now,
            )
        })
        .await
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound))
}
