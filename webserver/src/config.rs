use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(clap::Parser)]
pub struct AppConfig {
    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value_t = 8000)]
    pub port: u16,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}
