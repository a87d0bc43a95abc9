use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared::snapshot::snapshot_path;

use crate::config::AppConfig;
use crate::services::registry::{CoinSource, HttpCoinRegistry};
use crate::services::wallet::WalletRpc;

#[derive(Clone)]
pub struct AppState {
    rpc: WalletRpc,
    registry: Arc<dyn CoinSource>,
    snapshot_path: PathBuf,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let rpc = WalletRpc::new(config.rpc_timeout())?;
        let registry = HttpCoinRegistry::new(
            rpc.client().clone(),
            config.registry_url.clone(),
        );

        Ok(Self {
            rpc,
            registry: Arc::new(registry),
            snapshot_path: snapshot_path(&config.public_dir),
        })
    }

    pub fn rpc(&self) -> &WalletRpc {
        &self.rpc
    }

    pub fn registry(&self) -> &dyn CoinSource {
        self.registry.as_ref()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}
