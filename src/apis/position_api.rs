use alloy_primitives::{Address, Bytes, TxHash};
use auto_impl::auto_impl;

use crate::types::{
    contracts::{ModifyPositionParams, PoolKey},
    errors::ProvisionResult
};

#[async_trait::async_trait]
#[auto_impl(&, Box, Arc)]
pub trait PositionApi: Send + Sync {
    /// Calls `modifyPosition` on the router. Allowances for both currencies
    /// must already cover what the router pulls.
    async fn modify_position(
        &self,
        router: Address,
        pool_key: PoolKey,
        params: ModifyPositionParams,
        hook_data: Bytes
    ) -> ProvisionResult<TxHash>;
}
