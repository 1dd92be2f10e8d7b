use alloy_primitives::{
    Address, Bytes, I256, U256,
    aliases::{I24, U24}
};
use serde::{Deserialize, Serialize};

use super::{
    contracts::{EMPTY_HOOK_DATA, ModifyPositionParams, PoolKey},
    errors::{ProvisionError, ProvisionResult},
    units::ether
};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

pub const MAX_TICK_SPACING: i32 = i16::MAX as i32;
pub const MAX_FEE: u32 = 0xFFFFFF;

pub const DEFAULT_FEE: u32 = 3000;
pub const DEFAULT_TICK_SPACING: i32 = 60;

pub(crate) fn sort_tokens(token0: Address, token1: Address) -> (Address, Address) {
    if token0 < token1 { (token0, token1) } else { (token1, token0) }
}

/// The user editable half of a pool's identity. Currencies come from the
/// chain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolKeyInput {
    pub fee:          u32,
    pub tick_spacing: i32,
    pub hooks:        Address
}

impl PoolKeyInput {
    pub fn new(hooks: Address) -> Self {
        Self { fee: DEFAULT_FEE, tick_spacing: DEFAULT_TICK_SPACING, hooks }
    }

    /// Fee must fit a `uint24` and tick spacing must be in
    /// `1..=MAX_TICK_SPACING`.
    pub fn validate(&self) -> ProvisionResult<()> {
        if self.fee > MAX_FEE {
            return Err(ProvisionError::InvalidFee(self.fee));
        }
        if !(1..=MAX_TICK_SPACING).contains(&self.tick_spacing) {
            return Err(ProvisionError::InvalidTickSpacing(self.tick_spacing));
        }
        Ok(())
    }

    /// Builds the canonical pool key, ordering the two tokens so that
    /// `currency0 < currency1`.
    pub fn pool_key(&self, token_a: Address, token_b: Address) -> ProvisionResult<PoolKey> {
        self.validate()?;

        let (currency0, currency1) = sort_tokens(token_a, token_b);
        Ok(PoolKey {
            currency0,
            currency1,
            fee: U24::from(self.fee),
            tickSpacing: I24::unchecked_from(self.tick_spacing),
            hooks: self.hooks
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInput {
    pub tick_lower:      i32,
    pub tick_upper:      i32,
    pub liquidity_delta: I256
}

impl PositionInput {
    /// A range of ten tick spacings either side of zero, adding 1000 units of
    /// liquidity. Saturates for spacings no pool can have; [`Self::validate`]
    /// rejects the result.
    pub fn default_for_spacing(tick_spacing: i32) -> Self {
        let width = tick_spacing.saturating_mul(10);
        Self {
            tick_lower:      width.saturating_neg(),
            tick_upper:      width,
            liquidity_delta: ether(1000)
        }
    }

    pub fn validate(&self, tick_spacing: i32) -> ProvisionResult<()> {
        if self.tick_lower >= self.tick_upper {
            return Err(ProvisionError::InvalidTickRange(self.tick_lower, self.tick_upper));
        }

        if tick_spacing <= 0 {
            return Err(ProvisionError::InvalidTickSpacing(tick_spacing));
        }

        for tick in [self.tick_lower, self.tick_upper] {
            if !(MIN_TICK..=MAX_TICK).contains(&tick) {
                return Err(ProvisionError::TickOutOfBounds(tick));
            }
            if tick % tick_spacing != 0 {
                return Err(ProvisionError::TickNotAligned(tick, tick_spacing));
            }
        }

        Ok(())
    }

    pub fn modify_position_params(&self, tick_spacing: i32) -> ProvisionResult<ModifyPositionParams> {
        self.validate(tick_spacing)?;

        Ok(ModifyPositionParams {
            tickLower:      I24::unchecked_from(self.tick_lower),
            tickUpper:      I24::unchecked_from(self.tick_upper),
            liquidityDelta: self.liquidity_delta
        })
    }

    /// The amount an allowance must cover for this position. Removals pull
    /// nothing.
    pub fn required_allowance(&self) -> U256 {
        if self.liquidity_delta.is_positive() { self.liquidity_delta.into_raw() } else { U256::ZERO }
    }
}

/// Opaque bytes forwarded to the pool's hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookData(Option<Bytes>);

impl HookData {
    /// Parses user input. Blank input (or a bare `0x`) is stored as absent.
    pub fn parse(input: &str) -> ProvisionResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Ok(Self(None));
        }

        alloy_primitives::hex::decode(digits)
            .map(|raw| Self(Some(raw.into())))
            .map_err(|_| ProvisionError::InvalidHookData(input.to_string()))
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_none()
    }

    /// The bytes sent on the wire, substituting the empty marker when blank.
    pub fn to_wire(&self) -> Bytes {
        self.0.clone().unwrap_or(EMPTY_HOOK_DATA)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const LOW: Address = address!("0x1c7d4b196cb0c7b01d743fbc6116a902379c7238");
    const HIGH: Address = address!("0x7b79995e5f793a07bc00c21412e50ecae098e7f9");

    #[test]
    fn test_pool_key_orders_currencies() {
        let input = PoolKeyInput::new(Address::ZERO);

        let swapped = input.pool_key(HIGH, LOW).unwrap();
        let ordered = input.pool_key(LOW, HIGH).unwrap();

        assert_eq!(swapped, ordered);
        assert_eq!(swapped.currency0, LOW);
        assert_eq!(swapped.currency1, HIGH);
        assert_eq!(swapped.fee, U24::from(3000u32));
        assert_eq!(swapped.tickSpacing, I24::unchecked_from(60));
    }

    #[test]
    fn test_pool_key_rejects_bad_parameters() {
        let mut input = PoolKeyInput::new(Address::ZERO);
        input.fee = MAX_FEE + 1;
        assert!(matches!(input.pool_key(LOW, HIGH), Err(ProvisionError::InvalidFee(_))));

        let mut input = PoolKeyInput::new(Address::ZERO);
        input.tick_spacing = 0;
        assert!(matches!(input.pool_key(LOW, HIGH), Err(ProvisionError::InvalidTickSpacing(0))));
    }

    #[test]
    fn test_position_validation() {
        let position = PositionInput::default_for_spacing(60);
        assert_eq!(position.tick_lower, -600);
        assert_eq!(position.tick_upper, 600);
        assert!(position.validate(60).is_ok());

        let inverted = PositionInput { tick_lower: 600, tick_upper: -600, ..position };
        assert!(matches!(inverted.validate(60), Err(ProvisionError::InvalidTickRange(600, -600))));

        let empty = PositionInput { tick_lower: 120, tick_upper: 120, ..position };
        assert!(matches!(empty.validate(60), Err(ProvisionError::InvalidTickRange(120, 120))));

        let misaligned = PositionInput { tick_lower: -610, ..position };
        assert!(matches!(misaligned.validate(60), Err(ProvisionError::TickNotAligned(-610, 60))));

        let outside = PositionInput { tick_upper: MAX_TICK + 1, ..position };
        assert!(matches!(outside.validate(1), Err(ProvisionError::TickOutOfBounds(_))));
    }

    #[test]
    fn test_default_range_for_extreme_spacing() {
        let position = PositionInput::default_for_spacing(i32::MAX);
        assert_eq!((position.tick_lower, position.tick_upper), (-i32::MAX, i32::MAX));
        assert!(matches!(position.validate(i32::MAX), Err(ProvisionError::TickOutOfBounds(_))));

        let position = PositionInput::default_for_spacing(i32::MIN);
        assert_eq!(position.tick_lower, i32::MAX);
        assert!(position.validate(i32::MIN).is_err());

        let widest = PositionInput::default_for_spacing(MAX_TICK_SPACING);
        assert!(widest.validate(MAX_TICK_SPACING).is_ok());
    }

    #[test]
    fn test_required_allowance() {
        let position = PositionInput::default_for_spacing(60);
        assert_eq!(position.required_allowance(), ether(1000).into_raw());

        let removal = PositionInput { liquidity_delta: -ether(5), ..position };
        assert_eq!(removal.required_allowance(), U256::ZERO);
    }

    #[test]
    fn test_blank_hook_data_uses_marker() {
        for blank in ["", "   ", "0x"] {
            let data = HookData::parse(blank).unwrap();
            assert!(data.is_blank());
            assert_eq!(data.to_wire(), EMPTY_HOOK_DATA);
            assert_eq!(data.to_wire().len(), 1);
        }

        assert_eq!(HookData::default().to_wire(), EMPTY_HOOK_DATA);
    }

    #[test]
    fn test_hook_data_hex() {
        let data = HookData::parse("0xdeadbeef").unwrap();
        assert_eq!(data.to_wire(), Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]));

        assert!(matches!(HookData::parse("0xzz"), Err(ProvisionError::InvalidHookData(_))));
    }
}
