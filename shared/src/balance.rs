use std::str::FromStr;

use anyhow::Context;
use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub const DISPLAY_SCALE: i64 = 2;

pub type Address = String;

/// One published line of the crowdfunding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub name: String,
    pub address: Address,
    pub balance: String,
}

/// The two answers wallets give to a balance query.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceShape {
    /// Balance broken down per subaddress; the display address is the first
    /// subaddress.
    Subaddress { balance: Number, address: Address },
    /// Bare balance; the address must be asked for separately.
    Flat { balance: Number },
}

impl BalanceShape {
    pub fn from_result(result: &Value) -> Option<Self> {
        let balance = result.get("balance")?.as_number()?.clone();

        match result.get("per_subaddress").and_then(Value::as_array) {
            Some(entries) if !entries.is_empty() => {
                let address = entries[0].get("address")?.as_str()?.to_owned();
                Some(BalanceShape::Subaddress { balance, address })
            }
            _ => Some(BalanceShape::Flat { balance }),
        }
    }

    pub fn balance(&self) -> &Number {
        match self {
            BalanceShape::Subaddress { balance, .. } => balance,
            BalanceShape::Flat { balance } => balance,
        }
    }
}

pub fn address_from_result(result: &Value) -> Option<Address> {
    result.get("address")?.as_str().map(str::to_owned)
}

/// Renders `raw / 10^decimal` with exactly two decimals, rounding half up.
pub fn scale_balance(raw: &Number, decimal: i32) -> anyhow::Result<String> {
    let raw = BigDecimal::from_str(&raw.to_string())
        .with_context(|| format!("Balance {} is not a decimal number", raw))?;
    let factor = BigDecimal::from_str(&format!("1e{}", -i64::from(decimal)))
        .with_context(|| format!("Invalid decimal exponent {}", decimal))?;

    Ok((raw * factor)
        .with_scale_round(DISPLAY_SCALE, RoundingMode::HalfUp)
        .to_plain_string())
}
