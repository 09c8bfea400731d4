use crate::campaign::{Campaign, CampaignStatus, TaskKind};
use engage_types::{AccountAddress, CampaignError, CampaignId, Result, TokenAmount};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

type CampaignMap = HashMap<CampaignId, Arc<RwLock<Campaign>>>;

/// Durable mapping from campaign identifier to campaign record.
///
/// Owns identifier allocation and the append-only enumeration index used by
/// the expiry sweep. The outer map lock guards lookups and inserts only; each
/// record carries its own lock, so operations on distinct campaigns never
/// contend.
pub struct CampaignStore {
    campaigns: Arc<RwLock<CampaignMap>>,
    index: Arc<RwLock<Vec<CampaignId>>>,
    sequence: AtomicU64,
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignStore {
    pub fn new() -> Self {
        Self {
            campaigns: Arc::new(RwLock::new(HashMap::new())),
            index: Arc::new(RwLock::new(Vec::new())),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creation-parameter validation, shared with the ledger so the deposit
    /// is never custodied for parameters the store would reject.
    pub fn validate_params(
        reward_per_task: TokenAmount,
        total_budget: TokenAmount,
        validity_secs: i64,
        deposited: TokenAmount,
    ) -> Result<()> {
        if reward_per_task.is_zero() || total_budget.is_zero() {
            return Err(CampaignError::InvalidAmount);
        }
        if validity_secs <= 0 {
            return Err(CampaignError::InvalidDuration);
        }
        if deposited != total_budget {
            return Err(CampaignError::FundingMismatch {
                declared: total_budget,
                deposited,
            });
        }
        Ok(())
    }

    /// Allocates a fresh identifier and persists the record with
    /// `status = Active`. The identifier derivation incorporates a
    /// monotonically increasing sequence number, and non-existence is checked
    /// before insertion, so two campaigns from the same owner in the same
    /// second still get distinct identifiers.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner: AccountAddress,
        reward_per_task: TokenAmount,
        total_budget: TokenAmount,
        validity_secs: i64,
        task_kind: TaskKind,
        deposited: TokenAmount,
        now: i64,
    ) -> Result<CampaignId> {
        Self::validate_params(reward_per_task, total_budget, validity_secs, deposited)?;

        let mut campaigns = self.campaigns.write().await;

        let id = loop {
            let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
            let candidate = CampaignId::derive(&owner, seq, now);
            if !campaigns.contains_key(&candidate) {
                break candidate;
            }
        };

        let campaign = Campaign {
            id,
            owner,
            reward_per_task,
            total_budget,
            remaining_budget: total_budget,
            created_at: now,
            expires_at: now + validity_secs,
            status: CampaignStatus::Active,
            task_kind,
            claimants: Default::default(),
        };

        campaigns.insert(id, Arc::new(RwLock::new(campaign)));
        drop(campaigns);

        self.index.write().await.push(id);

        info!(
            campaign_id = %id,
            owner = %owner,
            reward = reward_per_task.to_base_units(),
            budget = total_budget.to_base_units(),
            expires_at = now + validity_secs,
            task_kind = %task_kind,
            "📋 Campaign record created"
        );

        Ok(id)
    }

    /// Returns a handle to the record; callers lock it themselves.
    pub async fn get(&self, id: &CampaignId) -> Option<Arc<RwLock<Campaign>>> {
        let campaigns = self.campaigns.read().await;
        campaigns.get(id).cloned()
    }

    /// Snapshot of the enumeration index, in creation order.
    pub async fn ids(&self) -> Vec<CampaignId> {
        let index = self.index.read().await;
        index.clone()
    }

    /// Total campaigns ever created. Records are never deleted, so this is
    /// monotonically non-decreasing.
    pub async fn count(&self) -> u64 {
        let index = self.index.read().await;
        index.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn amount(units: u64) -> TokenAmount {
        TokenAmount::from_base_units(units)
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = CampaignStore::new();
        let owner = AccountAddress::from_bytes([1; 32]);

        let id = store
            .create(owner, amount(10), amount(30), 3600, TaskKind::Follow, amount(30), NOW)
            .await
            .unwrap();

        let record = store.get(&id).await.unwrap();
        let campaign = record.read().await;
        assert_eq!(campaign.owner, owner);
        assert_eq!(campaign.remaining_budget, amount(30));
        assert_eq!(campaign.expires_at, NOW + 3600);
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_validation_failures() {
        let store = CampaignStore::new();
        let owner = AccountAddress::from_bytes([1; 32]);

        let err = store
            .create(owner, amount(0), amount(30), 3600, TaskKind::Follow, amount(30), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::InvalidAmount));

        let err = store
            .create(owner, amount(10), amount(30), 0, TaskKind::Follow, amount(30), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::InvalidDuration));

        let err = store
            .create(owner, amount(10), amount(30), 3600, TaskKind::Follow, amount(25), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, CampaignError::FundingMismatch { .. }));

        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_same_owner_same_instant_gets_distinct_ids() {
        let store = CampaignStore::new();
        let owner = AccountAddress::from_bytes([2; 32]);

        let a = store
            .create(owner, amount(10), amount(30), 3600, TaskKind::Retweet, amount(30), NOW)
            .await
            .unwrap();
        let b = store
            .create(owner, amount(10), amount(30), 3600, TaskKind::Retweet, amount(30), NOW)
            .await
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(store.ids().await, vec![a, b]);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent() {
        let store = CampaignStore::new();
        let owner = AccountAddress::from_bytes([3; 32]);
        let missing = CampaignId::derive(&owner, 99, NOW);
        assert!(store.get(&missing).await.is_none());
    }
}
