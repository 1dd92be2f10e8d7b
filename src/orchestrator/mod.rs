//! Two-approvals-then-one-action workflow for adding liquidity to a pool.
//!
//! Each token of the configured pair moves through
//! `NeedsApproval -> Approving -> Approved`. The move into `Approving` only
//! happens when [`LiquidityProvisioner::approve`] is called. A failed approval
//! falls back to `NeedsApproval` and is surfaced as a [`Notification`].
//! Once confirmed, a token stays `Approved` for the session regardless of
//! later allowance reads.
//!
//! State lives behind a lock that is never held across an await, so the two
//! approvals can run concurrently from a shared reference while each token
//! stays single flight.

mod approvals;
pub use approvals::*;

mod notifications;
pub use notifications::*;

mod submission;
pub use submission::*;

use alloy_primitives::{Address, Bytes, ChainId, I256, TxHash, U256};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use self::notifications::NotificationQueue;
use crate::{
    apis::{AllowanceApi, ApprovalApi, PositionApi},
    types::{
        ChainConfig, HookData, PoolKeyInput, PositionInput, ProvisionConfig, SupportedChain,
        contracts::{ModifyPositionParams, PoolKey},
        errors::{ProvisionError, ProvisionResult},
        units::parse_liquidity
    }
};

/// Wallet and chain the workflow acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletContext {
    pub wallet:   Address,
    pub chain_id: ChainId
}

impl WalletContext {
    pub fn new(wallet: Address, chain_id: ChainId) -> Self {
        Self { wallet, chain_id }
    }
}

type PreparedSubmission = (Address, PoolKey, ModifyPositionParams, Bytes);

#[derive(Debug)]
struct ProvisionState {
    context:   WalletContext,
    chain:     ChainConfig,
    pool:      PoolKeyInput,
    position:  PositionInput,
    hook_data: HookData,
    tokens:    [TokenApproval; 2],
    submit:    SubmitStatus,
    /// Bumped whenever the wallet or chain changes so allowance reads issued
    /// before the switch are dropped.
    epoch:     u64
}

impl ProvisionState {
    fn new(context: WalletContext, chain: ChainConfig) -> Self {
        let pool = PoolKeyInput::new(chain.default_hook());
        Self {
            context,
            chain,
            position: PositionInput::default_for_spacing(pool.tick_spacing),
            pool,
            hook_data: HookData::default(),
            tokens: [TokenApproval::new(chain.token0()), TokenApproval::new(chain.token1())],
            submit: SubmitStatus::Idle,
            epoch: 0
        }
    }

    fn token(&self, side: TokenSide) -> &TokenApproval {
        &self.tokens[side.index()]
    }

    fn token_mut(&mut self, side: TokenSide) -> &mut TokenApproval {
        &mut self.tokens[side.index()]
    }

    fn status(&self, side: TokenSide) -> ApprovalStatus {
        self.token(side)
            .status(self.position.required_allowance())
    }

    /// Points the workflow at a new wallet or chain. Allowances become
    /// unknown until re-read; local approval flags are kept.
    fn switch_context(&mut self, context: WalletContext, chain: ChainConfig) {
        self.context = context;
        self.chain = chain;
        for (entry, token) in self.tokens.iter_mut().zip([chain.token0(), chain.token1()]) {
            entry.token = token;
            entry.allowance = None;
        }
        self.epoch += 1;
    }
}

pub struct LiquidityProvisioner<P> {
    provider:          P,
    require_approvals: bool,
    state:             Mutex<ProvisionState>,
    notifications:     NotificationQueue
}

impl<P> LiquidityProvisioner<P>
where
    P: AllowanceApi + ApprovalApi + PositionApi
{
    /// Builds the workflow for `context` with default pool inputs. Allowances
    /// start unknown until [`Self::refresh_allowances`] runs.
    pub fn new(provider: P, context: WalletContext) -> ProvisionResult<Self> {
        let chain = SupportedChain::try_from(context.chain_id)?.config();

        Ok(Self {
            provider,
            require_approvals: false,
            state: Mutex::new(ProvisionState::new(context, chain)),
            notifications: NotificationQueue::default()
        })
    }

    /// Builds the workflow and performs the initial allowance reads.
    pub async fn initialize(provider: P, context: WalletContext) -> ProvisionResult<Self> {
        let this = Self::new(provider, context)?;
        this.refresh_allowances().await;
        Ok(this)
    }

    /// Applies the pool defaults, hook override and submit gate from
    /// `config`. Fails without changing anything if the configured fee or
    /// tick spacing cannot describe a pool.
    pub fn with_config(self, config: &ProvisionConfig) -> ProvisionResult<Self> {
        {
            let mut state = self.state.lock();
            let pool = PoolKeyInput {
                fee: config.fee(),
                tick_spacing: config.tick_spacing(),
                hooks: config.hook_override().unwrap_or(state.pool.hooks)
            };
            pool.validate()?;

            state.position = PositionInput::default_for_spacing(pool.tick_spacing);
            state.pool = pool;
        }

        Ok(Self { require_approvals: config.require_approvals(), ..self })
    }

    /// Refuse to submit while either token still needs approval.
    pub fn with_approval_gate(self) -> Self {
        Self { require_approvals: true, ..self }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn context(&self) -> WalletContext {
        self.state.lock().context
    }

    pub fn chain_config(&self) -> ChainConfig {
        self.state.lock().chain
    }

    pub fn token_address(&self, side: TokenSide) -> Address {
        self.state.lock().token(side).token
    }

    /// Last observed allowance, `None` while unknown.
    pub fn allowance(&self, side: TokenSide) -> Option<U256> {
        self.state.lock().token(side).allowance
    }

    pub fn approval_status(&self, side: TokenSide) -> ApprovalStatus {
        self.state.lock().status(side)
    }

    pub fn approval_view(&self, side: TokenSide) -> ApprovalView {
        ApprovalView::new(side, self.approval_status(side))
    }

    pub fn submit_status(&self) -> SubmitStatus {
        self.state.lock().submit.clone()
    }

    pub fn submit_view(&self) -> SubmitView {
        SubmitView::from(&self.state.lock().submit)
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn pool_input(&self) -> PoolKeyInput {
        self.state.lock().pool
    }

    pub fn position_input(&self) -> PositionInput {
        self.state.lock().position
    }

    pub fn hook_data(&self) -> HookData {
        self.state.lock().hook_data.clone()
    }

    /// The canonical pool key for the current inputs.
    pub fn pool_key(&self) -> ProvisionResult<PoolKey> {
        let state = self.state.lock();
        state
            .pool
            .pool_key(state.token(TokenSide::Token0).token, state.token(TokenSide::Token1).token)
    }

    pub fn set_fee(&self, fee: u32) {
        self.state.lock().pool.fee = fee;
    }

    pub fn set_tick_spacing(&self, tick_spacing: i32) {
        self.state.lock().pool.tick_spacing = tick_spacing;
    }

    pub fn set_hook_address(&self, hooks: Address) {
        self.state.lock().pool.hooks = hooks;
    }

    pub fn set_hook_data(&self, input: &str) -> ProvisionResult<()> {
        let hook_data = HookData::parse(input)?;
        self.state.lock().hook_data = hook_data;
        Ok(())
    }

    pub fn set_tick_lower(&self, tick_lower: i32) {
        self.state.lock().position.tick_lower = tick_lower;
    }

    pub fn set_tick_upper(&self, tick_upper: i32) {
        self.state.lock().position.tick_upper = tick_upper;
    }

    pub fn set_liquidity_delta(&self, liquidity_delta: I256) {
        self.state.lock().position.liquidity_delta = liquidity_delta;
    }

    /// Sets the delta from a human readable decimal amount of 18 decimal
    /// units.
    pub fn set_liquidity_delta_str(&self, amount: &str) -> ProvisionResult<()> {
        let liquidity_delta = parse_liquidity(amount)?;
        self.set_liquidity_delta(liquidity_delta);
        Ok(())
    }

    /// Re-reads the allowance for one token. A failed read leaves the
    /// allowance unknown, which is treated as zero.
    #[instrument(level = "debug", skip(self))]
    pub async fn refresh_allowance(&self, side: TokenSide) -> Option<U256> {
        let (token, owner, spender, epoch) = {
            let state = self.state.lock();
            (state.token(side).token, state.context.wallet, state.chain.router(), state.epoch)
        };

        let allowance = match self.provider.allowance(token, owner, spender).await {
            Ok(allowance) => Some(allowance),
            Err(e) => {
                warn!(%side, ?token, "failed to read allowance: {e}");
                None
            }
        };

        let mut state = self.state.lock();
        if state.epoch == epoch {
            state.token_mut(side).allowance = allowance;
        }
        allowance
    }

    pub async fn refresh_allowances(&self) {
        futures::future::join(
            self.refresh_allowance(TokenSide::Token0),
            self.refresh_allowance(TokenSide::Token1)
        )
        .await;
    }

    /// Approves the router to spend an unlimited amount of `side`'s token.
    ///
    /// Fails with [`ProvisionError::ApprovalInFlight`] if an approval for the
    /// same token has not resolved yet.
    #[instrument(skip(self))]
    pub async fn approve(&self, side: TokenSide) -> ProvisionResult<TxHash> {
        let (token, spender, previous) = {
            let mut state = self.state.lock();
            let spender = state.chain.router();
            let entry = state.token_mut(side);
            if entry.local == LocalApproval::InFlight {
                return Err(ProvisionError::ApprovalInFlight(side));
            }

            let previous = entry.local;
            entry.local = LocalApproval::InFlight;
            (entry.token, spender, previous)
        };

        match self.provider.approve_max(token, spender).await {
            Ok(tx_hash) => {
                debug!(%side, ?tx_hash, "approval confirmed");
                self.state.lock().token_mut(side).local = LocalApproval::Confirmed;
                self.refresh_allowance(side).await;
                Ok(tx_hash)
            }
            Err(e) => {
                self.state.lock().token_mut(side).local = previous;

                self.notifications
                    .push(Notification::error(format!("Error Approving {side}"), &e));
                Err(e)
            }
        }
    }

    /// Submits `modifyPosition` for the current inputs.
    ///
    /// Tick range and pool parameters are validated before anything is sent.
    /// Unless the approval gate is enabled, submission does not wait for the
    /// approvals and an insufficient allowance reverts on chain.
    #[instrument(skip(self))]
    pub async fn add_liquidity(&self) -> ProvisionResult<TxHash> {
        let (router, pool_key, params, hook_data) = {
            let mut state = self.state.lock();
            if state.submit.is_processing() {
                return Err(ProvisionError::SubmissionInFlight);
            }

            match self.prepare_submission(&state) {
                Ok(prepared) => {
                    state.submit = SubmitStatus::Processing;
                    prepared
                }
                Err(e) => {
                    state.submit = SubmitStatus::Errored(e.to_string());
                    drop(state);
                    self.notify_submit_error(&e);
                    return Err(e);
                }
            }
        };

        debug!(?pool_key, ?params, "submitting position modification");
        let result = self
            .provider
            .modify_position(router, pool_key, params, hook_data)
            .await;

        let mut state = self.state.lock();
        match result {
            Ok(tx_hash) => {
                state.submit = SubmitStatus::Idle;
                drop(state);
                info!(?tx_hash, "liquidity provisioned");
                self.notifications
                    .push(Notification::info("Liquidity Provisioned", tx_hash));
                Ok(tx_hash)
            }
            Err(e) => {
                state.submit = SubmitStatus::Errored(e.to_string());
                drop(state);
                self.notify_submit_error(&e);
                Err(e)
            }
        }
    }

    /// Moves the workflow to another chain. Token, router and hook addresses
    /// are reloaded from the chain table, replacing any edited hook address,
    /// and allowances are read again. Confirmed approvals stay confirmed.
    #[instrument(skip(self))]
    pub async fn switch_chain(&self, chain_id: ChainId) -> ProvisionResult<()> {
        let chain = SupportedChain::try_from(chain_id)?.config();
        {
            let mut state = self.state.lock();
            let context = WalletContext::new(state.context.wallet, chain_id);
            state.switch_context(context, chain);
            state.pool.hooks = chain.default_hook();
        }

        self.refresh_allowances().await;
        Ok(())
    }

    /// Re-reads allowances for `wallet`. The hook address and confirmed
    /// approvals are kept.
    #[instrument(skip(self))]
    pub async fn switch_wallet(&self, wallet: Address) {
        {
            let mut state = self.state.lock();
            let context = WalletContext::new(wallet, state.context.chain_id);
            let chain = state.chain;
            state.switch_context(context, chain);
        }

        self.refresh_allowances().await;
    }

    fn prepare_submission(&self, state: &ProvisionState) -> ProvisionResult<PreparedSubmission> {
        let pool_key = state
            .pool
            .pool_key(state.token(TokenSide::Token0).token, state.token(TokenSide::Token1).token)?;
        let params = state
            .position
            .modify_position_params(state.pool.tick_spacing)?;

        if self.require_approvals {
            if let Some(side) = TokenSide::BOTH
                .into_iter()
                .find(|side| state.status(*side) != ApprovalStatus::Approved)
            {
                return Err(ProvisionError::ApprovalRequired(side));
            }
        }

        Ok((state.chain.router(), pool_key, params, state.hook_data.to_wire()))
    }

    fn notify_submit_error(&self, e: &ProvisionError) {
        self.notifications
            .push(Notification::error("Error Provisioning Liquidity", e));
    }
}
