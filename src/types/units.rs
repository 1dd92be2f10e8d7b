use alloy_primitives::{
    I256, U256,
    utils::{format_units, parse_units}
};

use super::errors::ProvisionResult;

/// Both pool tokens use the 18 decimal convention.
pub const LIQUIDITY_DECIMALS: u8 = 18;

/// `amount * 10^18` as a signed base unit value.
pub fn ether(amount: u64) -> I256 {
    I256::from_raw(U256::from(amount) * U256::from(10u64).pow(U256::from(LIQUIDITY_DECIMALS)))
}

/// Parses a human readable decimal (`"1000"`, `"-0.5"`) into base units.
pub fn parse_liquidity(amount: &str) -> ProvisionResult<I256> {
    Ok(parse_units(amount.trim(), LIQUIDITY_DECIMALS)?.get_signed())
}

/// Formats base units as a decimal without trailing zeros.
pub fn format_liquidity(amount: I256) -> ProvisionResult<String> {
    let formatted = format_units(amount, LIQUIDITY_DECIMALS)?;
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    Ok(trimmed.to_string())
}
