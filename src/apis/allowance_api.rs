use alloy_primitives::{Address, U256};
use auto_impl::auto_impl;

use crate::types::errors::ProvisionResult;

/// Read only access to ERC20 allowances.
#[async_trait::async_trait]
#[auto_impl(&, Box, Arc)]
pub trait AllowanceApi: Send + Sync {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> ProvisionResult<U256>;
}
