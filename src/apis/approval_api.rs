use alloy_primitives::{Address, TxHash, U256};
use auto_impl::auto_impl;

use crate::types::{contracts::MAX_UINT, errors::ProvisionResult};

#[async_trait::async_trait]
#[auto_impl(&, Box, Arc)]
pub trait ApprovalApi: Send + Sync {
    /// Sends `approve(spender, amount)` to `token` and resolves once the
    /// transaction is confirmed.
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> ProvisionResult<TxHash>;

    async fn approve_max(&self, token: Address, spender: Address) -> ProvisionResult<TxHash> {
        self.approve(token, spender, MAX_UINT).await
    }
}
