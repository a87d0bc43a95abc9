use std::path::{Path, PathBuf};

use anyhow::Context;
use shared::coin::CoinDescriptor;
use shared::error::{AsSnapshotError, AsTaskJoinError, MainError};
use shared::snapshot::{persist_snapshot, Snapshot};

use crate::services::registry::CoinSource;
use crate::services::resolver::{self, ResolveOutcome};
use crate::services::wallet::WalletRpc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub resolved: usize,
    pub skipped: usize,
}

/// Resolves every coin in order, one wallet at a time. Coins that fail to
/// resolve are left out.
pub async fn build_snapshot(
    rpc: &WalletRpc,
    coins: &[CoinDescriptor],
) -> (Snapshot, PassSummary) {
    let mut records = Vec::with_capacity(coins.len());
    let mut summary = PassSummary::default();

    for coin in coins {
        tracing::info!(coin = %coin.name, "Updating information for the currency");

        match resolver::resolve(rpc, coin).await {
            ResolveOutcome::Resolved(record) => {
                tracing::info!(
                    coin = %record.name,
                    address = %record.address,
                    balance = %record.balance,
                    "Resolved balance"
                );
                summary.resolved += 1;
                records.push(record);
            }
            ResolveOutcome::Skipped(reason) => {
                tracing::warn!(
                    coin = %coin.name,
                    endpoint = %coin.endpoint(),
                    %reason,
                    "Error getting information for currency"
                );
                summary.skipped += 1;
            }
        }
    }

    (Snapshot::new(records), summary)
}

pub async fn write_snapshot(
    path: PathBuf,
    snapshot: Snapshot,
) -> Result<(), MainError> {
    tokio::task::spawn_blocking(move || persist_snapshot(&path, &snapshot))
        .await
        .context("Snapshot writer panicked")
        .into_task_join_error()?
        .into_snapshot_error()
}

/// One full pass: fetch the coins, resolve them and replace the snapshot.
/// An empty registry still overwrites the snapshot with no coins.
pub async fn update_snapshot(
    source: &dyn CoinSource,
    rpc: &WalletRpc,
    path: &Path,
) -> Result<PassSummary, MainError> {
    let coins = source.fetch_coin_descriptors().await;
    tracing::info!("Got {} coins from registry...", coins.len());

    let (snapshot, summary) = build_snapshot(rpc, &coins).await;
    write_snapshot(path.to_path_buf(), snapshot).await?;

    Ok(summary)
}
