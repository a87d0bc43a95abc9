use serde::{Deserialize, Serialize};

pub const RPC_PATH: &str = "json_rpc";

/// A wallet daemon to poll, as published by the coin registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDescriptor {
    pub name: String,
    pub url: String,
    pub port: u16,
    pub rpc_method: String,
    /// Power of ten between the coin's smallest unit and one whole coin.
    pub decimal: i32,
}

impl CoinDescriptor {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/{}", self.url, self.port, RPC_PATH)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinRegistry {
    pub coins: Vec<CoinDescriptor>,
}
