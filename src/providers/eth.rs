use std::str::FromStr;

use alloy_network::{Ethereum, EthereumWallet, ReceiptResponse};
use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolCall;
use tracing::{debug, instrument};

use crate::{
    apis::{AllowanceApi, ApprovalApi, PositionApi},
    types::{
        ProvisionConfig,
        contracts::{IERC20, ModifyPositionParams, PoolKey, PoolModifyPositionTest},
        errors::{ProvisionError, ProvisionResult}
    }
};

/// Signing provider for allowance reads and the approval / position writes.
#[derive(Debug, Clone)]
pub struct EthRpcProvider<P> {
    eth_provider: P,
    from:         Address
}

impl EthRpcProvider<()> {
    /// Connects to the configured rpc with a wallet built from the
    /// configured private key.
    pub async fn connect(config: &ProvisionConfig) -> eyre::Result<EthRpcProvider<impl Provider + Clone>> {
        let signer = PrivateKeySigner::from_str(config.private_key()?).map_err(ProvisionError::from)?;
        let from = signer.address();

        let eth_provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect(config.eth_rpc_url())
            .await?;

        Ok(EthRpcProvider { eth_provider, from })
    }
}

impl<P: Provider<Ethereum>> EthRpcProvider<P> {
    pub fn new(eth_provider: P, from: Address) -> Self {
        Self { eth_provider, from }
    }

    pub fn provider(&self) -> &P {
        &self.eth_provider
    }

    /// The wallet that signs every write.
    pub fn from(&self) -> Address {
        self.from
    }

    pub async fn chain_id(&self) -> ProvisionResult<u64> {
        Ok(self.eth_provider.get_chain_id().await?)
    }

    pub(crate) async fn view_call<IC>(&self, contract: Address, call: IC) -> ProvisionResult<IC::Return>
    where
        IC: SolCall + Send
    {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(contract)),
            input: TransactionInput::both(call.abi_encode().into()),
            ..Default::default()
        };

        let data = self.eth_provider.call(tx).await?;
        Ok(IC::abi_decode_returns(&data)?)
    }

    /// Sends `call` to `contract` and waits for its receipt. A transaction
    /// mined with a failed status is returned as [`ProvisionError::Reverted`].
    pub(crate) async fn send_call<IC>(&self, contract: Address, call: IC) -> ProvisionResult<TxHash>
    where
        IC: SolCall + Send
    {
        let tx = TransactionRequest {
            from: Some(self.from),
            to: Some(TxKind::Call(contract)),
            input: TransactionInput::both(call.abi_encode().into()),
            ..Default::default()
        };

        let pending = self
            .eth_provider
            .send_transaction(tx)
            .await
            .map_err(ProvisionError::from_tx_error)?;
        debug!(tx_hash = ?pending.tx_hash(), "submitted transaction");

        let receipt = pending.get_receipt().await?;
        receipt_outcome(receipt.transaction_hash(), receipt.status())
    }
}

fn receipt_outcome(tx_hash: TxHash, succeeded: bool) -> ProvisionResult<TxHash> {
    if succeeded {
        debug!(?tx_hash, "transaction confirmed");
        Ok(tx_hash)
    } else {
        Err(ProvisionError::Reverted(format!("transaction {tx_hash} reverted")))
    }
}

#[async_trait::async_trait]
impl<P: Provider<Ethereum>> AllowanceApi for EthRpcProvider<P> {
    #[instrument(level = "debug", skip(self))]
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> ProvisionResult<U256> {
        self.view_call(token, IERC20::allowanceCall { owner, spender })
            .await
    }
}

#[async_trait::async_trait]
impl<P: Provider<Ethereum>> ApprovalApi for EthRpcProvider<P> {
    #[instrument(skip(self))]
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> ProvisionResult<TxHash> {
        self.send_call(token, IERC20::approveCall { spender, amount })
            .await
    }
}

#[async_trait::async_trait]
impl<P: Provider<Ethereum>> PositionApi for EthRpcProvider<P> {
    #[instrument(skip(self, hook_data), fields(hook_data_len = hook_data.len()))]
    async fn modify_position(
        &self,
        router: Address,
        pool_key: PoolKey,
        params: ModifyPositionParams,
        hook_data: Bytes
    ) -> ProvisionResult<TxHash> {
        self.send_call(
            router,
            PoolModifyPositionTest::modifyPositionCall { key: pool_key, params, hookData: hook_data }
        )
        .await
    }
}
