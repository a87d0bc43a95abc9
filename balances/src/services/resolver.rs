use shared::balance::{
    address_from_result, scale_balance, BalanceRecord, BalanceShape,
};
use shared::coin::CoinDescriptor;
use shared::rpc::{HttpVerb, RpcParams, GET_ADDRESS_METHOD};
use thiserror::Error;

use crate::services::wallet::WalletRpc;

pub const MONERO_COIN_NAME: &str = "Monero";
pub const MONERO_ADDRESS_INDICES: [u32; 2] = [0, 1];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("balance call failed")]
    BalanceCallFailed,
    #[error("balance result has an unknown shape")]
    UnknownBalanceShape,
    #[error("getaddress call failed")]
    AddressCallFailed,
    #[error("getaddress result has no address")]
    MissingAddress,
    #[error("balance can't be scaled: {0}")]
    InvalidBalance(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(BalanceRecord),
    Skipped(SkipReason),
}

pub fn balance_params(coin: &CoinDescriptor) -> RpcParams {
    if coin.name == MONERO_COIN_NAME {
        RpcParams::address_indices(&MONERO_ADDRESS_INDICES)
    } else {
        RpcParams::empty()
    }
}

/// Queries one wallet for its balance and display address. Flat-shaped
/// wallets cost a second `getaddress` round trip.
pub async fn resolve(rpc: &WalletRpc, coin: &CoinDescriptor) -> ResolveOutcome {
    let endpoint = coin.endpoint();
    let verb = HttpVerb::for_balance_method(&coin.rpc_method);

    let Ok(result) = rpc
        .call(&endpoint, &coin.rpc_method, &balance_params(coin), verb)
        .await
    else {
        return ResolveOutcome::Skipped(SkipReason::BalanceCallFailed);
    };
    tracing::debug!(coin = %coin.name, method = %coin.rpc_method, %result, "Balance result");

    let Some(shape) = BalanceShape::from_result(&result) else {
        return ResolveOutcome::Skipped(SkipReason::UnknownBalanceShape);
    };

    let address = match &shape {
        BalanceShape::Subaddress { address, .. } => address.clone(),
        BalanceShape::Flat { .. } => {
            let Ok(result) = rpc
                .call(
                    &endpoint,
                    GET_ADDRESS_METHOD,
                    &RpcParams::empty(),
                    HttpVerb::Get,
                )
                .await
            else {
                return ResolveOutcome::Skipped(SkipReason::AddressCallFailed);
            };

            match address_from_result(&result) {
                Some(address) => address,
                None => {
                    return ResolveOutcome::Skipped(SkipReason::MissingAddress)
                }
            }
        }
    };

    match scale_balance(shape.balance(), coin.decimal) {
        Ok(balance) => ResolveOutcome::Resolved(BalanceRecord {
            name: coin.name.clone(),
            address,
            balance,
        }),
        Err(e) => {
            ResolveOutcome::Skipped(SkipReason::InvalidBalance(e.to_string()))
        }
    }
}
