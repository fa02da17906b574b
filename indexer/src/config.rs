use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(clap::Parser)]
pub struct AppConfig {
    #[clap(long, env)]
    pub proxy_url: String,

    #[clap(long, env)]
    pub database_url: String,

    /// Path to the versioned task/target manifest.
    #[clap(long, env, default_value = "targets.json")]
    pub targets_file: String,

    #[clap(long, env, default_value_t = 1000)]
    pub default_batch_size: i64,

    /// Retention for sequence rows, in seconds. 0 disables purging.
    #[clap(long, env, default_value_t = 0)]
    pub purge_sequences_interval: u64,

    /// Retention for hourly summary rows, in seconds. 0 disables purging.
    #[clap(long, env, default_value_t = 0)]
    pub purge_hourly_summaries_interval: u64,

    /// Retention for system events, in seconds. 0 disables purging.
    #[clap(long, env, default_value_t = 0)]
    pub purge_system_events_interval: u64,

    /// Retention for balance events, in seconds. 0 disables purging.
    #[clap(long, env, default_value_t = 0)]
    pub purge_balance_events_interval: u64,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Run the forward indexing pipeline over the next batch of heights.
    Run {
        #[clap(long, env, default_value_t = 0)]
        start_height: i64,

        #[clap(long, env)]
        batch_size: Option<i64>,
    },
    /// Reindex heights whose stored index version differs from the current one.
    Backfill {
        #[clap(long)]
        parallel: bool,

        #[clap(long)]
        force: bool,

        #[clap(long, value_delimiter = ',')]
        target_ids: Vec<i64>,
    },
    /// Index a single height, optionally without persisting anything.
    RunHeight {
        #[clap(long)]
        height: i64,

        #[clap(long, default_value_t = 0)]
        target_id: i64,

        #[clap(long)]
        dry: bool,
    },
    /// Rebuild hourly and daily rollups from sequences and balance events.
    Summarize,
    /// Delete rows older than the configured retention intervals.
    Purge,
}
