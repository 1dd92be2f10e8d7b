use alloy_primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};

use super::{
    chains::{ChainConfig, SupportedChain},
    errors::ProvisionError,
    pool::{DEFAULT_FEE, DEFAULT_TICK_SPACING}
};

pub const ETH_RPC_URL_VAR: &str = "ETH_RPC_URL";
pub const CHAIN_ID_VAR: &str = "CHAIN_ID";
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Connection and pool defaults for a provisioning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionConfig {
    eth_rpc_url:       String,
    chain:             SupportedChain,
    #[serde(skip_serializing)]
    private_key:       Option<String>,
    fee:               u32,
    tick_spacing:      i32,
    /// Refuse to submit until both tokens are approved.
    require_approvals: bool,
    hook_override:     Option<Address>
}

impl ProvisionConfig {
    pub fn new(eth_rpc_url: impl ToString, chain: SupportedChain) -> Self {
        Self {
            eth_rpc_url: eth_rpc_url.to_string(),
            chain,
            private_key: None,
            fee: DEFAULT_FEE,
            tick_spacing: DEFAULT_TICK_SPACING,
            require_approvals: false,
            hook_override: None
        }
    }

    /// Reads `ETH_RPC_URL`, `CHAIN_ID` and `PRIVATE_KEY`, loading a `.env`
    /// file first if one exists.
    pub fn from_env() -> eyre::Result<Self> {
        dotenv::dotenv().ok();

        let eth_rpc_url = std::env::var(ETH_RPC_URL_VAR)
            .map_err(|_| eyre::eyre!("{ETH_RPC_URL_VAR} not found in .env"))?;
        let chain_id: ChainId = std::env::var(CHAIN_ID_VAR)
            .map_err(|_| eyre::eyre!("{CHAIN_ID_VAR} not found in .env"))?
            .parse()?;
        let chain = SupportedChain::try_from(chain_id)?;

        let mut config = Self::new(eth_rpc_url, chain);
        config.private_key = std::env::var(PRIVATE_KEY_VAR).ok();
        Ok(config)
    }

    pub fn with_private_key(mut self, private_key: impl ToString) -> Self {
        self.private_key = Some(private_key.to_string());
        self
    }

    pub fn with_fee(mut self, fee: u32) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_tick_spacing(mut self, tick_spacing: i32) -> Self {
        self.tick_spacing = tick_spacing;
        self
    }

    pub fn with_approval_gate(mut self) -> Self {
        self.require_approvals = true;
        self
    }

    pub fn with_hook(mut self, hook: Address) -> Self {
        self.hook_override = Some(hook);
        self
    }

    pub fn eth_rpc_url(&self) -> &str {
        &self.eth_rpc_url
    }

    pub fn chain(&self) -> SupportedChain {
        self.chain
    }

    pub fn chain_config(&self) -> ChainConfig {
        self.chain.config()
    }

    pub fn private_key(&self) -> Result<&str, ProvisionError> {
        self.private_key
            .as_deref()
            .ok_or_else(|| ProvisionError::MissingConfig(PRIVATE_KEY_VAR))
    }

    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    pub fn require_approvals(&self) -> bool {
        self.require_approvals
    }

    pub fn hook_override(&self) -> Option<Address> {
        self.hook_override
    }

    /// The hook to start from: the override if set, else the chain default.
    pub fn hook(&self) -> Address {
        self.hook_override
            .unwrap_or_else(|| self.chain.config().default_hook())
    }
}
