use std::path::PathBuf;
use std::time::Duration;

use shared::crawler::DEFAULT_INTERVAL;
use shared::log_config::LogConfig;

pub const DEFAULT_REGISTRY_URL: &str = "https://raw.githubusercontent.com/Infinium-8/infinium-crowdfunding-json/refs/heads/master/infinium-crowdfunding.json";

#[derive(clap::Parser)]
pub struct AppConfig {
    #[clap(long, env, default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    #[clap(
        long,
        env,
        default_value = "public",
        help = "Directory the coins.json snapshot is written to"
    )]
    pub public_dir: PathBuf,

    #[clap(
        long,
        env,
        default_value_t = DEFAULT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Seconds between passes"
    )]
    pub interval: u64,

    #[clap(
        long,
        env,
        help = "Per request timeout in seconds, none if unset"
    )]
    pub rpc_timeout: Option<u64>,

    #[clap(flatten)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn rpc_timeout(&self) -> Option<Duration> {
        self.rpc_timeout.map(Duration::from_secs)
    }
}
