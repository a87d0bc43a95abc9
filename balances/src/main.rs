use balances::app_state::AppState;
use balances::config::AppConfig;
use balances::services::snapshot as snapshot_service;
use clap::Parser;
use shared::crawler;
use shared::error::{AsConfigError, MainError};
use tokio::time::Instant;

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let config = AppConfig::parse();

    config.log.init();

    tracing::info!("version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        registry = %config.registry_url,
        public_dir = %config.public_dir.display(),
        interval_secs = config.interval,
        "Starting balances crawler"
    );

    let app_state = AppState::new(&config).into_config_error()?;

    crawler::crawl(
        move |pass| crawling_fn(app_state.clone(), pass),
        config.interval(),
    )
    .await
}

async fn crawling_fn(app_state: AppState, pass: u64) -> Result<(), MainError> {
    tracing::info!("Starting pass {}...", pass);
    let started = Instant::now();

    let summary = snapshot_service::update_snapshot(
        app_state.registry(),
        app_state.rpc(),
        app_state.snapshot_path(),
    )
    .await?;

    tracing::info!(
        pass,
        resolved = summary.resolved,
        skipped = summary.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Crowdfunding list updated successfully"
    );

    Ok(())
}
