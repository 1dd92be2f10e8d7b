use alloy_json_rpc::RpcError;
use alloy_primitives::utils::UnitsError;
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportErrorKind;

use crate::orchestrator::TokenSide;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("eth call error: {0:?}")]
    EthCall(#[from] RpcError<TransportErrorKind>),
    #[error("abi decoding error: {0:?}")]
    AbiDecodingError(#[from] alloy_sol_types::Error),
    #[error("pending transaction error: {0}")]
    PendingTx(#[from] PendingTransactionError),
    #[error("user rejected the request: {0}")]
    UserRejected(String),
    #[error("insufficient funds for gas: {0}")]
    InsufficientFunds(String),
    #[error("transaction reverted: {0}")]
    Reverted(String),
    #[error("unsupported chain id {0}")]
    UnsupportedChain(u64),
    #[error("invalid tick range - lower {0} must be below upper {1}")]
    InvalidTickRange(i32, i32),
    #[error("tick {0} is not a multiple of tick spacing {1}")]
    TickNotAligned(i32, i32),
    #[error("tick {0} is outside of the usable range")]
    TickOutOfBounds(i32),
    #[error("invalid fee {0} - must fit in uint24")]
    InvalidFee(u32),
    #[error("invalid tick spacing {0}")]
    InvalidTickSpacing(i32),
    #[error("invalid hook data {0:?}")]
    InvalidHookData(String),
    #[error("liquidity amount error: {0}")]
    Units(#[from] UnitsError),
    #[error("approval for {0} is already in flight")]
    ApprovalInFlight(TokenSide),
    #[error("{0} still requires approval")]
    ApprovalRequired(TokenSide),
    #[error("a liquidity submission is already in flight")]
    SubmissionInFlight,
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),
    #[error("invalid private key: {0}")]
    Signer(#[from] alloy_signer_local::LocalSignerError)
}

impl ProvisionError {
    /// Sorts an rpc failure from a write into the user facing categories.
    pub fn from_tx_error(err: RpcError<TransportErrorKind>) -> Self {
        let Some((code, message)) = err
            .as_error_resp()
            .map(|payload| (payload.code, payload.message.to_string()))
        else {
            return Self::EthCall(err)
        };

        let lowered = message.to_lowercase();
        if code == 4001 || lowered.contains("user rejected") || lowered.contains("user denied") {
            Self::UserRejected(message)
        } else if lowered.contains("insufficient funds") || lowered.contains("gas required exceeds") {
            Self::InsufficientFunds(message)
        } else if code == 3 || lowered.contains("execution reverted") {
            Self::Reverted(message)
        } else {
            Self::EthCall(err)
        }
    }
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
