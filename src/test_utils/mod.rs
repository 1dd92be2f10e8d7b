pub mod mock_chain;
pub use mock_chain::*;

use alloy_primitives::{Address, address};

use crate::orchestrator::WalletContext;

pub const TEST_WALLET: Address = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");

pub fn anvil_context() -> WalletContext {
    WalletContext::new(TEST_WALLET, 31337)
}

pub fn sepolia_context() -> WalletContext {
    WalletContext::new(TEST_WALLET, 11155111)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
