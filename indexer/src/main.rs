use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

use clap::Parser;
use clap_verbosity_flag::LevelFilter;
use indexer::app_state::AppState;
use indexer::config::{AppConfig, Command};
use indexer::indexing::purge::{PurgeConfig, PurgeUseCase};
use indexer::indexing::summarize::SummarizeUseCase;
use indexer::metrics;
use indexer::pipeline::{
    BackfillConfig, IndexingPipeline, RunConfig, StartConfig,
};
use indexer::targets::TargetCatalog;
use orm::migrations::run_migrations;
use shared::error::{
    AsConfigError, AsDbError, AsIndexingError, MainError,
};
use tokio::signal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let config = AppConfig::parse();

    let log_level = match config.verbosity.log_level_filter() {
        LevelFilter::Off => None,
        LevelFilter::Error => Some(Level::ERROR),
        LevelFilter::Warn => Some(Level::WARN),
        LevelFilter::Info => Some(Level::INFO),
        LevelFilter::Debug => Some(Level::DEBUG),
        LevelFilter::Trace => Some(Level::TRACE),
    };
    if let Some(log_level) = log_level {
        let subscriber =
            FmtSubscriber::builder().with_max_level(log_level).finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    }

    let app_state = Arc::new(
        AppState::new(config.database_url.clone()).into_db_error()?,
    );
    let conn = app_state.get_db_connection().await.into_db_error()?;

    run_migrations(&conn)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .into_db_error()?;

    let client = rpc::Client::from_url(&config.proxy_url);
    let shutdown = must_exit_handle();

    match &config.command {
        Command::Run {
            start_height,
            batch_size,
        } => {
            let pipeline = IndexingPipeline::new(
                &config.targets_file,
                app_state.clone(),
                client,
                shutdown,
            )
            .into_config_error()?;

            pipeline
                .start(StartConfig {
                    batch_size: batch_size.unwrap_or(config.default_batch_size),
                    start_height: *start_height,
                })
                .await
                .into_indexing_error()?;
        }
        Command::Backfill {
            parallel,
            force,
            target_ids,
        } => {
            let pipeline = IndexingPipeline::new(
                &config.targets_file,
                app_state.clone(),
                client,
                shutdown,
            )
            .into_config_error()?;

            pipeline
                .backfill(BackfillConfig {
                    parallel: *parallel,
                    force: *force,
                    target_ids: target_ids.clone(),
                })
                .await
                .into_indexing_error()?;
        }
        Command::RunHeight {
            height,
            target_id,
            dry,
        } => {
            let pipeline = IndexingPipeline::new(
                &config.targets_file,
                app_state.clone(),
                client,
                shutdown,
            )
            .into_config_error()?;

            let payload = pipeline
                .run(RunConfig {
                    height: *height,
                    desired_target_id: *target_id,
                    dry: *dry,
                })
                .await
                .into_indexing_error()?;

            tracing::info!(
                height = payload.current_height,
                transactions = payload.transaction_seqs.len(),
                validators = payload.validator_seqs.len(),
                delegations = payload.delegation_seqs.len(),
                balance_events = payload.balance_events.len(),
                "height indexed"
            );
        }
        Command::Summarize => {
            let targets = TargetCatalog::from_file(&config.targets_file)
                .into_config_error()?;

            SummarizeUseCase::new(
                app_state.clone(),
                targets.current_version_id(),
            )
            .execute()
            .await
            .into_indexing_error()?;
        }
        Command::Purge => {
            let targets = TargetCatalog::from_file(&config.targets_file)
                .into_config_error()?;

            PurgeUseCase::new(
                app_state.clone(),
                PurgeConfig::from_app_config(&config),
                targets.current_version_id(),
            )
            .execute()
            .await
            .into_indexing_error()?;
        }
    }

    metrics::log_snapshot();

    Ok(())
}

fn must_exit_handle() -> Arc<AtomicBool> {
    let handle = Arc::new(AtomicBool::new(false));
    let task_handle = Arc::clone(&handle);
    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .expect("Error receiving interrupt signal");
        task_handle.store(true, atomic::Ordering::Relaxed);
    });
    handle
}
