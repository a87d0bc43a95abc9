use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::Client;
use serde_json::Value;
use shared::error::{AsRpcError, MainError};
use shared::rpc::{HttpVerb, RpcParams, RpcRequest, RpcResponse};

/// JSON-RPC 2.0 client for the wallet daemons. One attempt per call, no
/// retries.
#[derive(Clone, Debug)]
pub struct WalletRpc {
    client: Client,
}

impl WalletRpc {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns the `result` member of the response. Transport errors,
    /// non-2xx statuses and malformed or result-less bodies are logged and
    /// collapse into [`MainError::RpcError`].
    pub async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: &RpcParams,
        verb: HttpVerb,
    ) -> Result<Value, MainError> {
        tracing::info!(%endpoint, %method, %verb, "Calling wallet RPC");

        self.exchange(endpoint, method, params, verb)
            .await
            .into_rpc_error()
    }

    async fn exchange(
        &self,
        endpoint: &str,
        method: &str,
        params: &RpcParams,
        verb: HttpVerb,
    ) -> anyhow::Result<Value> {
        let request = RpcRequest::new(method, params);

        let builder = match verb {
            HttpVerb::Get => self.client.get(endpoint),
            HttpVerb::Post => self.client.post(endpoint),
        };

        let response = builder
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Call error {} to {}", verb, endpoint))?
            .error_for_status()
            .with_context(|| format!("Call error {} to {}", verb, endpoint))?;

        let body: RpcResponse = response.json().await.with_context(|| {
            format!("Malformed {} response from {}", method, endpoint)
        })?;

        match (body.result, body.error) {
            (Some(result), _) => Ok(result),
            (None, Some(error)) => Err(anyhow!(
                "{} at {} returned error: {}",
                method,
                endpoint,
                error
            )),
            (None, None) => {
                Err(anyhow!("{} at {} returned no result", method, endpoint))
            }
        }
    }
}
