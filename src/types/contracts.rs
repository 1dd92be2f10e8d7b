use alloy_primitives::{Bytes, U256};

pub use _contracts::*;

/// Approval amount treated as unlimited by ERC20 implementations.
pub const MAX_UINT: U256 = U256::MAX;

/// Sent in place of blank hook data. Some hooks treat a zero length payload
/// differently from an explicit single zero byte.
pub const EMPTY_HOOK_DATA: Bytes = Bytes::from_static(&[0x00]);

#[rustfmt::skip]
mod _contracts {
    alloy_sol_types::sol! {
        #[derive(Debug, PartialEq, Eq, Hash)]
        struct PoolKey {
            address currency0;
            address currency1;
            uint24 fee;
            int24 tickSpacing;
            address hooks;
        }

        #[derive(Debug, PartialEq, Eq, Hash)]
        struct ModifyPositionParams {
            int24 tickLower;
            int24 tickUpper;
            int256 liquidityDelta;
        }

        interface IERC20 {
            function allowance(address owner, address spender) external view returns (uint256);
            function approve(address spender, uint256 amount) external returns (bool);
        }

        interface PoolModifyPositionTest {
            function modifyPosition(
                PoolKey memory key,
                ModifyPositionParams memory params,
                bytes memory hookData
            ) external payable returns (int256 delta);
        }
    }
}
