use engage_types::{AccountAddress, CampaignId, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Task category a campaign pays for. Informational only: it never alters
/// ledger logic and is passed through to the verification context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Follow,
    Retweet,
    ContentCreation,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Follow => write!(f, "follow"),
            TaskKind::Retweet => write!(f, "retweet"),
            TaskKind::ContentCreation => write!(f, "content_creation"),
        }
    }
}

/// Campaign lifecycle state. Transitions are monotone: Active -> Expired is
/// irreversible, Expired -> Withdrawn is terminal, and no campaign is ever
/// reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Expired,
    Withdrawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub owner: AccountAddress,
    pub reward_per_task: TokenAmount,
    pub total_budget: TokenAmount,
    pub remaining_budget: TokenAmount,
    pub created_at: i64,
    pub expires_at: i64,
    pub status: CampaignStatus,
    pub task_kind: TaskKind,
    pub claimants: HashSet<AccountAddress>,
}

impl Campaign {
    /// Expiry is evaluated lazily against the supplied clock reading; it does
    /// not depend on any sweep having run.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn has_claimed(&self, claimant: &AccountAddress) -> bool {
        self.claimants.contains(claimant)
    }

    pub fn claimant_count(&self) -> usize {
        self.claimants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expires_at: i64) -> Campaign {
        let owner = AccountAddress::from_bytes([1; 32]);
        Campaign {
            id: CampaignId::derive(&owner, 0, 100),
            owner,
            reward_per_task: TokenAmount::from_base_units(10),
            total_budget: TokenAmount::from_base_units(30),
            remaining_budget: TokenAmount::from_base_units(30),
            created_at: 100,
            expires_at,
            status: CampaignStatus::Active,
            task_kind: TaskKind::Follow,
            claimants: HashSet::new(),
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let campaign = sample(200);
        assert!(!campaign.is_expired_at(199));
        assert!(campaign.is_expired_at(200));
        assert!(campaign.is_expired_at(201));
    }

    #[test]
    fn test_claimant_membership() {
        let mut campaign = sample(200);
        let user = AccountAddress::from_bytes([2; 32]);
        assert!(!campaign.has_claimed(&user));
        campaign.claimants.insert(user);
        assert!(campaign.has_claimed(&user));
        assert_eq!(campaign.claimant_count(), 1);
    }
}
