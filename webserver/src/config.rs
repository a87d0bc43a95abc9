use std::path::PathBuf;

use shared::log_config::LogConfig;

#[derive(clap::Parser, Clone)]
pub struct AppConfig {
    #[clap(long, env, default_value = "2345")]
    pub port: u16,

    #[clap(
        long,
        env,
        default_value = "public",
        help = "Directory holding coins.json and the static assets"
    )]
    pub public_dir: PathBuf,

    #[clap(flatten)]
    pub log: LogConfig,
}
