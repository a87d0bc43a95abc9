use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::coin::{CoinDescriptor, CoinRegistry};
use shared::error::AsRegistryError;

/// Source of the coins to poll on each pass.
#[async_trait]
pub trait CoinSource: Send + Sync {
    /// Never fails: an unreachable or malformed registry yields no coins.
    async fn fetch_coin_descriptors(&self) -> Vec<CoinDescriptor>;
}

pub struct HttpCoinRegistry {
    client: Client,
    url: String,
}

impl HttpCoinRegistry {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> anyhow::Result<CoinRegistry> {
        self.client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Error fetching coins from {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Error fetching coins from {}", self.url))?
            .json::<CoinRegistry>()
            .await
            .with_context(|| format!("Malformed coin registry at {}", self.url))
    }
}

#[async_trait]
impl CoinSource for HttpCoinRegistry {
    async fn fetch_coin_descriptors(&self) -> Vec<CoinDescriptor> {
        match self.fetch().await.into_registry_error() {
            Ok(registry) => registry.coins,
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_fetch_coin_descriptors_in_registry_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/crowdfunding.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "coins": [
                    {"name": "Monero", "url": "xmr", "port": 18082, "rpcMethod": "get_balance", "decimal": 12},
                    {"name": "Alpha", "url": "h", "port": 1, "rpcMethod": "getbalance", "decimal": 2}
                ]
            })))
            .mount(&server)
            .await;

        let registry = HttpCoinRegistry::new(
            Client::new(),
            format!("{}/crowdfunding.json", server.uri()),
        );
        let coins = registry.fetch_coin_descriptors().await;

        let names: Vec<_> = coins.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Monero", "Alpha"]);
    }

    #[tokio::test]
    async fn test_unavailable_registry_yields_no_coins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let registry = HttpCoinRegistry::new(Client::new(), server.uri());

        assert!(registry.fetch_coin_descriptors().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_registry_yields_no_coins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"coins": "none"})),
            )
            .mount(&server)
            .await;

        let registry = HttpCoinRegistry::new(Client::new(), server.uri());

        assert!(registry.fetch_coin_descriptors().await.is_empty());
    }
}
