use std::{
    collections::{HashMap, HashSet},
    sync::Arc
};

use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::{
    apis::{AllowanceApi, ApprovalApi, PositionApi},
    types::{
        contracts::{ModifyPositionParams, PoolKey},
        errors::{ProvisionError, ProvisionResult}
    }
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedApproval {
    pub token:   Address,
    pub spender: Address,
    pub amount:  U256
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedModification {
    pub router:    Address,
    pub pool_key:  PoolKey,
    pub params:    ModifyPositionParams,
    pub hook_data: Bytes
}

#[derive(Debug, Default)]
struct MockChainState {
    allowances:      HashMap<(Address, Address, Address), U256>,
    failing_reads:   HashSet<Address>,
    rejected_tokens: HashMap<Address, String>,
    reverted_tokens: HashMap<Address, String>,
    modify_revert:   Option<String>,
    approvals:       Vec<RecordedApproval>,
    modifications:   Vec<RecordedModification>,
    tx_count:        u64
}

/// In memory ERC20 allowances and router, signing as a single wallet.
#[derive(Debug, Clone)]
pub struct MockChain {
    wallet:        Address,
    state:         Arc<Mutex<MockChainState>>,
    approval_gate: Option<Arc<Semaphore>>
}

impl MockChain {
    pub fn new(wallet: Address) -> Self {
        Self { wallet, state: Default::default(), approval_gate: None }
    }

    /// Approvals block until a permit is added to the returned semaphore.
    pub fn with_approval_gate(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.approval_gate = Some(gate.clone());
        (self, gate)
    }

    pub fn set_allowance(&self, token: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .allowances
            .insert((token, self.wallet, spender), amount);
    }

    pub fn fail_reads(&self, token: Address) {
        self.state.lock().failing_reads.insert(token);
    }

    pub fn reject_approvals(&self, token: Address, message: impl ToString) {
        self.state
            .lock()
            .rejected_tokens
            .insert(token, message.to_string());
    }

    /// Approvals of `token` are mined but fail on chain.
    pub fn revert_approvals(&self, token: Address, message: impl ToString) {
        self.state
            .lock()
            .reverted_tokens
            .insert(token, message.to_string());
    }

    pub fn revert_modifications(&self, message: impl ToString) {
        self.state.lock().modify_revert = Some(message.to_string());
    }

    pub fn allow_modifications(&self) {
        self.state.lock().modify_revert = None;
    }

    pub fn approvals(&self) -> Vec<RecordedApproval> {
        self.state.lock().approvals.clone()
    }

    pub fn modifications(&self) -> Vec<RecordedModification> {
        self.state.lock().modifications.clone()
    }

    fn next_tx_hash(state: &mut MockChainState) -> TxHash {
        state.tx_count += 1;
        B256::with_last_byte(state.tx_count as u8)
    }
}

#[async_trait::async_trait]
impl AllowanceApi for MockChain {
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> ProvisionResult<U256> {
        let state = self.state.lock();
        if state.failing_reads.contains(&token) {
            return Err(ProvisionError::Reverted(format!("allowance read failed for {token}")));
        }

        Ok(state
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl ApprovalApi for MockChain {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> ProvisionResult<TxHash> {
        if let Some(gate) = &self.approval_gate {
            gate.acquire()
                .await
                .expect("approval gate closed")
                .forget();
        }

        let mut state = self.state.lock();
        if let Some(message) = state.rejected_tokens.get(&token) {
            return Err(ProvisionError::UserRejected(message.clone()));
        }
        if let Some(message) = state.reverted_tokens.get(&token) {
            return Err(ProvisionError::Reverted(message.clone()));
        }

        state.approvals.push(RecordedApproval { token, spender, amount });
        state
            .allowances
            .insert((token, self.wallet, spender), amount);
        Ok(Self::next_tx_hash(&mut state))
    }
}

#[async_trait::async_trait]
impl PositionApi for MockChain {
    async fn modify_position(
        &self,
        router: Address,
        pool_key: PoolKey,
        params: ModifyPositionParams,
        hook_data: Bytes
    ) -> ProvisionResult<TxHash> {
        let mut state = self.state.lock();
        if let Some(message) = &state.modify_revert {
            return Err(ProvisionError::Reverted(message.clone()));
        }

        state
            .modifications
            .push(RecordedModification { router, pool_key, params, hook_data });
        Ok(Self::next_tx_hash(&mut state))
    }
}
