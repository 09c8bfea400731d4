use crate::amount::TokenAmount;
use crate::id::CampaignId;
use thiserror::Error;

/// Every rejection leaves the attempted operation without any partial state
/// change; callers own any retry policy.
#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("reward and budget must both be positive")]
    InvalidAmount,

    #[error("validity duration must be positive")]
    InvalidDuration,

    #[error("deposit {deposited} does not match declared budget {declared}")]
    FundingMismatch {
        declared: TokenAmount,
        deposited: TokenAmount,
    },

    #[error("campaign not found: {0}")]
    NotFound(CampaignId),

    #[error("campaign has expired")]
    CampaignExpired,

    #[error("remaining budget cannot cover another reward")]
    BudgetExhausted,

    #[error("claimant was already rewarded for this campaign")]
    AlreadyClaimed,

    #[error("proof is empty or malformed")]
    InvalidProof,

    #[error("proof rejected by verifier")]
    VerificationFailed,

    #[error("only the campaign owner may withdraw")]
    Unauthorized,

    #[error("campaign has not expired yet")]
    NotYetExpired,

    #[error("campaign funds already withdrawn")]
    AlreadyWithdrawn,

    #[error("fund transfer failed: {0}")]
    Transfer(String),
}

pub type Result<T> = std::result::Result<T, CampaignError>;
