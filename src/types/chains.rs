use alloy_chains::NamedChain;
use alloy_primitives::{Address, ChainId, address};
use serde::{Deserialize, Serialize};

use super::errors::ProvisionError;

/// Chains with a deployed router, token pair and default hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedChain {
    Anvil,
    Sepolia
}

impl SupportedChain {
    pub fn chain_id(&self) -> ChainId {
        self.named() as u64
    }

    pub fn named(&self) -> NamedChain {
        match self {
            Self::Anvil => NamedChain::AnvilHardhat,
            Self::Sepolia => NamedChain::Sepolia
        }
    }

    pub fn config(&self) -> ChainConfig {
        match self {
            Self::Anvil => ANVIL_CHAIN_CONFIG,
            Self::Sepolia => SEPOLIA_CHAIN_CONFIG
        }
    }
}

impl TryFrom<ChainId> for SupportedChain {
    type Error = ProvisionError;

    fn try_from(chain_id: ChainId) -> Result<Self, Self::Error> {
        match NamedChain::try_from(chain_id) {
            Ok(NamedChain::AnvilHardhat) => Ok(Self::Anvil),
            Ok(NamedChain::Sepolia) => Ok(Self::Sepolia),
            _ => Err(ProvisionError::UnsupportedChain(chain_id))
        }
    }
}

/// Per chain deployment addresses. The two tokens are listed in configured
/// order, not pool order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    chain_id:     ChainId,
    token0:       Address,
    token1:       Address,
    router:       Address,
    default_hook: Address
}

impl ChainConfig {
    pub fn by_chain(chain_id: ChainId) -> Option<Self> {
        SupportedChain::try_from(chain_id)
            .ok()
            .map(|chain| chain.config())
    }

    #[inline]
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    #[inline]
    pub fn token0(&self) -> Address {
        self.token0
    }

    #[inline]
    pub fn token1(&self) -> Address {
        self.token1
    }

    /// The liquidity router that pulls tokens during `modifyPosition`, and
    /// therefore the spender every approval targets.
    #[inline]
    pub fn router(&self) -> Address {
        self.router
    }

    #[inline]
    pub fn default_hook(&self) -> Address {
        self.default_hook
    }
}

/// Local deployment from the default anvil deployer. Tokens and router are
/// the deployer's nonce 2, 3 and 4 contracts; the hook is mined for its flag
/// bits, so its address is a placeholder to be replaced by
/// [`crate::types::ProvisionConfig::with_hook`] for a given deployment.
pub const ANVIL_CHAIN_CONFIG: ChainConfig = ChainConfig {
    chain_id:     31337,
    token0:       address!("0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0"),
    token1:       address!("0xcf7ed3acca5a467e9e704c703e8d87f634fb0fc9"),
    router:       address!("0xdc64a140aa3e981100a9beca4e685f962f0cf6c9"),
    default_hook: address!("0x3ce72a2ab7a0d1da9a4c70a7ea2dbd2b1a2c4d3b")
};

/// Sepolia placeholders: WETH, USDC, a test router and a test hook. Liquidity
/// deltas are always 18 decimal liquidity units, independent of the token
/// decimals.
pub const SEPOLIA_CHAIN_CONFIG: ChainConfig = ChainConfig {
    chain_id:     11155111,
    token0:       address!("0x7b79995e5f793a07bc00c21412e50ecae098e7f9"),
    token1:       address!("0x1c7d4b196cb0c7b01d743fbc6116a902379c7238"),
    router:       address!("0x83fedbed11b3667f40263a88e8435fca51a03f8c"),
    default_hook: address!("0x26f209526dc896e3a69b761a26161791b7e3aa80")
};
