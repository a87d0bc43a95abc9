use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const JSONRPC_ID: u64 = 1;

pub const GET_BALANCE_METHOD: &str = "getbalance";
pub const GET_ADDRESS_METHOD: &str = "getaddress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    /// Wallets exposing `getbalance` only answer it over GET.
    pub fn for_balance_method(method: &str) -> Self {
        if method == GET_BALANCE_METHOD {
            HttpVerb::Get
        } else {
            HttpVerb::Post
        }
    }
}

impl Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpVerb::Get => write!(f, "GET"),
            HttpVerb::Post => write!(f, "POST"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RpcParams {
    Positional(Vec<Value>),
    Named(serde_json::Map<String, Value>),
}

impl RpcParams {
    pub fn empty() -> Self {
        RpcParams::Positional(Vec::new())
    }

    pub fn address_indices(indices: &[u32]) -> Self {
        let mut named = serde_json::Map::new();
        named.insert("address_indices".to_string(), Value::from(indices.to_vec()));
        RpcParams::Named(named)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a RpcParams,
    pub id: u64,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a RpcParams) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: JSONRPC_ID,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// Wallets don't all fill in the error object, so both members are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_verb_selection() {
        assert_eq!(HttpVerb::for_balance_method("getbalance"), HttpVerb::Get);
        assert_eq!(HttpVerb::for_balance_method("get_balance"), HttpVerb::Post);
        assert_eq!(HttpVerb::for_balance_method("getBalance"), HttpVerb::Post);
    }

    #[test]
    fn test_request_envelope() {
        let params = RpcParams::empty();
        let request = RpcRequest::new("getaddress", &params);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "getaddress", "params": [], "id": 1})
        );
    }

    #[test]
    fn test_address_indices_params() {
        let params = RpcParams::address_indices(&[0, 1]);

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"address_indices": [0, 1]})
        );
    }

    #[test]
    fn test_response_with_error_object() {
        let response: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32601, "message": "Method not found"}
        }))
        .unwrap();

        assert!(response.result.is_none());
        assert_eq!(
            response.error.unwrap().to_string(),
            "Method not found (code -32601)"
        );
    }

    #[test]
    fn test_response_with_partial_error_object_keeps_result() {
        let response: RpcResponse = serde_json::from_value(json!({
            "result": {"balance": 1},
            "error": {"code": 0}
        }))
        .unwrap();

        assert_eq!(response.result, Some(json!({"balance": 1})));
        assert_eq!(response.error.unwrap().code, 0);
    }
}
