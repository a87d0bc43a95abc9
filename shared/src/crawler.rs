use core::fmt;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::signal;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::MainError;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Running,
}

impl Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// Runs `f` right away and then once per `interval` until Ctrl-C.
pub async fn crawl<F, Fut>(f: F, interval: Duration) -> Result<(), MainError>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<(), MainError>>,
{
    crawl_until(f, interval, shutdown_signal()).await
}

/// Passes never overlap: a tick that fires while a pass is running is
/// delayed until that pass returns. `shutdown` is only observed between
/// passes. A zero `interval` is a configuration error.
pub async fn crawl_until<F, Fut, S>(
    f: F,
    interval: Duration,
    shutdown: S,
) -> Result<(), MainError>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<(), MainError>>,
    S: Future<Output = ()>,
{
    if interval.is_zero() {
        tracing::error!("{}: crawl interval must be non-zero", MainError::Config);
        return Err(MainError::Config);
    }

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut state = PassState::Idle;
    let mut pass = 0_u64;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        pass += 1;
        state = PassState::Running;
        tracing::debug!(pass, %state, "Starting pass");

        let started = Instant::now();
        if let Err(reason) = f(pass).await {
            tracing::error!(pass, %reason, "Pass failed");
        }

        state = PassState::Idle;
        tracing::debug!(
            pass,
            %state,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pass done"
        );
    }

    tracing::info!(passes = pass, %state, "Crawler stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(reason) = signal::ctrl_c().await {
        tracing::error!(%reason, "Error receiving interrupt signal");
        std::future::pending::<()>().await;
    }
    tracing::warn!("signal shutdown");
}
