use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One side of the configured token pair, in configured (not pool) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSide {
    Token0,
    Token1
}

impl TokenSide {
    pub const BOTH: [TokenSide; 2] = [TokenSide::Token0, TokenSide::Token1];

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Token0 => 0,
            Self::Token1 => 1
        }
    }
}

impl fmt::Display for TokenSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token0 => write!(f, "Token0"),
            Self::Token1 => write!(f, "Token1")
        }
    }
}

/// What this session has done about a token's approval. `Confirmed` is never
/// downgraded by a later allowance read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalApproval {
    #[default]
    NotStarted,
    InFlight,
    Confirmed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    NeedsApproval,
    Approving,
    Approved
}

impl ApprovalStatus {
    /// A confirmed local approval wins over the allowance. Otherwise an
    /// unknown or zero allowance, or one below `required`, needs approval.
    pub fn derive(local: LocalApproval, allowance: Option<U256>, required: U256) -> Self {
        match local {
            LocalApproval::Confirmed => Self::Approved,
            LocalApproval::InFlight => Self::Approving,
            LocalApproval::NotStarted => match allowance {
                Some(granted) if !granted.is_zero() && granted >= required => Self::Approved,
                _ => Self::NeedsApproval
            }
        }
    }
}

/// Render hints for one token's approval controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApprovalView {
    pub show_approve_button: bool,
    pub approve_disabled:    bool,
    pub show_approved:       bool,
    pub label:               &'static str
}

impl ApprovalView {
    pub fn new(side: TokenSide, status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::NeedsApproval => Self {
                show_approve_button: true,
                approve_disabled:    false,
                show_approved:       false,
                label:               match side {
                    TokenSide::Token0 => "Approve Token0",
                    TokenSide::Token1 => "Approve Token1"
                }
            },
            ApprovalStatus::Approving => Self {
                show_approve_button: true,
                approve_disabled:    true,
                show_approved:       false,
                label:               "Approving..."
            },
            ApprovalStatus::Approved => Self {
                show_approve_button: false,
                approve_disabled:    true,
                show_approved:       true,
                label:               "Approved"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenApproval {
    pub(crate) token:     Address,
    /// `None` until the first successful read, and after a failed one.
    pub(crate) allowance: Option<U256>,
    pub(crate) local:     LocalApproval
}

impl TokenApproval {
    pub(crate) fn new(token: Address) -> Self {
        Self { token, allowance: None, local: LocalApproval::NotStarted }
    }

    pub(crate) fn status(&self, required: U256) -> ApprovalStatus {
        ApprovalStatus::derive(self.local, self.allowance, required)
    }
}
