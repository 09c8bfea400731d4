use crate::campaign::{Campaign, CampaignStatus, TaskKind};
use crate::config::LedgerConfig;
use crate::events::{CampaignEvent, EventBus};
use crate::gateway::{FundTransferGateway, MemoryGateway};
use crate::store::CampaignStore;
use crate::time::{SystemTimeSource, TimeSource};
use crate::verifier::{MinLengthVerifier, ProofVerifier};
use engage_types::{AccountAddress, CampaignError, CampaignId, Result, TokenAmount};
use std::sync::Arc;
use tracing::{info, warn};

/// Enforces the task-completion, expiry and withdrawal protocols over the
/// records held by [`CampaignStore`].
///
/// Every state-changing call locks exactly one campaign record for its whole
/// duration, so check-then-act on budget and claimant membership is atomic
/// per campaign while distinct campaigns proceed in parallel.
///
/// Transfer ordering: state is mutated first and the gateway is invoked while
/// the record lock is still held; a gateway failure rolls the staged mutation
/// back before the lock is released. No observer ever sees the budget
/// decremented without the claimant recorded, or a transfer without both.
pub struct CampaignLedger {
    store: Arc<CampaignStore>,
    verifier: Arc<dyn ProofVerifier>,
    gateway: Arc<dyn FundTransferGateway>,
    events: EventBus,
    time: Arc<dyn TimeSource>,
}

impl CampaignLedger {
    pub fn new(
        store: Arc<CampaignStore>,
        verifier: Arc<dyn ProofVerifier>,
        gateway: Arc<dyn FundTransferGateway>,
        events: EventBus,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store,
            verifier,
            gateway,
            events,
            time,
        }
    }

    /// Fully in-process ledger: memory gateway, placeholder verifier,
    /// wall-clock time.
    pub fn in_memory(config: &LedgerConfig) -> Self {
        Self::new(
            Arc::new(CampaignStore::new()),
            Arc::new(MinLengthVerifier::new(config.proof_min_chars)),
            Arc::new(MemoryGateway::new()),
            EventBus::new(config.event_buffer),
            Arc::new(SystemTimeSource),
        )
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &Arc<CampaignStore> {
        &self.store
    }

    /// Creates a campaign funded by `deposited`.
    ///
    /// Parameters are validated before the deposit is custodied; persistence
    /// after validation cannot fail, so a custodied deposit always ends up
    /// backing a persisted record.
    pub async fn create_campaign(
        &self,
        owner: AccountAddress,
        reward_per_task: TokenAmount,
        total_budget: TokenAmount,
        validity_secs: i64,
        task_kind: TaskKind,
        deposited: TokenAmount,
    ) -> Result<CampaignId> {
        CampaignStore::validate_params(reward_per_task, total_budget, validity_secs, deposited)?;

        self.gateway
            .custody(deposited, owner)
            .await
            .map_err(|e| CampaignError::Transfer(e.to_string()))?;

        let now = self.time.now();
        let id = self
            .store
            .create(
                owner,
                reward_per_task,
                total_budget,
                validity_secs,
                task_kind,
                deposited,
                now,
            )
            .await?;

        self.events.emit(CampaignEvent::CampaignCreated {
            campaign_id: id,
            owner,
            reward_per_task,
            total_budget,
            expires_at: now + validity_secs,
            task_kind,
            timestamp: now,
        });

        info!(
            campaign_id = %id,
            owner = %owner,
            budget = total_budget.to_base_units(),
            "🎯 Campaign created and funded"
        );
        Ok(id)
    }

    /// Pays `claimant` one reward for a verified task completion.
    ///
    /// At most one claim per identity per campaign ever succeeds. Expiry is
    /// re-checked here against the clock regardless of whether a sweep has
    /// marked the record.
    pub async fn complete_task(
        &self,
        campaign_id: CampaignId,
        claimant: AccountAddress,
        proof: &str,
    ) -> Result<TokenAmount> {
        let record = self
            .store
            .get(&campaign_id)
            .await
            .ok_or(CampaignError::NotFound(campaign_id))?;
        let mut campaign = record.write().await;

        let now = self.time.now();
        if campaign.is_expired_at(now) {
            return Err(CampaignError::CampaignExpired);
        }

        let reward = campaign.reward_per_task;
        let remaining = campaign
            .remaining_budget
            .checked_sub(reward)
            .ok_or(CampaignError::BudgetExhausted)?;

        if campaign.has_claimed(&claimant) {
            return Err(CampaignError::AlreadyClaimed);
        }
        if proof.trim().is_empty() {
            return Err(CampaignError::InvalidProof);
        }
        if !self
            .verifier
            .verify(proof, campaign.task_kind, campaign_id, claimant)
        {
            return Err(CampaignError::VerificationFailed);
        }

        // Claimant and budget first, transfer second. The record lock is held
        // across the transfer, so a reentrant claim from the same identity
        // cannot slip in between.
        let budget_before = campaign.remaining_budget;
        campaign.claimants.insert(claimant);
        campaign.remaining_budget = remaining;

        if let Err(e) = self.gateway.release(reward, claimant).await {
            campaign.claimants.remove(&claimant);
            campaign.remaining_budget = budget_before;
            warn!(
                campaign_id = %campaign_id,
                claimant = %claimant,
                error = %e,
                "↩️ Reward transfer failed, claim rolled back"
            );
            return Err(CampaignError::Transfer(e.to_string()));
        }

        info!(
            campaign_id = %campaign_id,
            claimant = %claimant,
            reward = reward.to_base_units(),
            remaining = remaining.to_base_units(),
            "✅ Task completed, reward paid"
        );

        self.events.emit(CampaignEvent::TaskCompleted {
            campaign_id,
            claimant,
            reward,
            proof: proof.to_string(),
            timestamp: now,
        });

        Ok(reward)
    }

    /// Returns the unclaimed remainder to the owner once the campaign has
    /// expired. Exactly one withdrawal per campaign ever succeeds.
    pub async fn withdraw_funds(
        &self,
        campaign_id: CampaignId,
        caller: AccountAddress,
    ) -> Result<TokenAmount> {
        let record = self
            .store
            .get(&campaign_id)
            .await
            .ok_or(CampaignError::NotFound(campaign_id))?;
        let mut campaign = record.write().await;

        if caller != campaign.owner {
            return Err(CampaignError::Unauthorized);
        }

        let now = self.time.now();
        if !campaign.is_expired_at(now) {
            return Err(CampaignError::NotYetExpired);
        }
        if campaign.status == CampaignStatus::Withdrawn {
            return Err(CampaignError::AlreadyWithdrawn);
        }

        // Expiry is recorded, never skipped: a withdrawal from a
        // still-Active record passes through Expired first.
        if campaign.status == CampaignStatus::Active {
            campaign.status = CampaignStatus::Expired;
            self.events.emit(CampaignEvent::CampaignExpired {
                campaign_id,
                timestamp: now,
            });
        }

        let refund = campaign.remaining_budget;
        campaign.remaining_budget = TokenAmount::ZERO;
        campaign.status = CampaignStatus::Withdrawn;

        if let Err(e) = self.gateway.release(refund, campaign.owner).await {
            campaign.remaining_budget = refund;
            campaign.status = CampaignStatus::Expired;
            warn!(
                campaign_id = %campaign_id,
                owner = %campaign.owner,
                error = %e,
                "↩️ Withdrawal transfer failed, rolled back"
            );
            return Err(CampaignError::Transfer(e.to_string()));
        }

        info!(
            campaign_id = %campaign_id,
            owner = %campaign.owner,
            refund = refund.to_base_units(),
            "🏦 Unspent funds withdrawn"
        );

        self.events.emit(CampaignEvent::CampaignWithdrawn {
            campaign_id,
            owner: campaign.owner,
            refund,
            timestamp: now,
        });

        Ok(refund)
    }

    /// Marks every Active campaign past its expiry time as Expired.
    ///
    /// Advisory bookkeeping only: `complete_task` and `withdraw_funds`
    /// re-check expiry themselves. Idempotent, and locks one campaign at a
    /// time, so an interrupted pass leaves every touched record consistently
    /// Active or Expired.
    pub async fn sweep_expired(&self) -> usize {
        let ids = self.store.ids().await;
        let mut marked = 0;

        for id in ids {
            let Some(record) = self.store.get(&id).await else {
                continue;
            };
            let mut campaign = record.write().await;

            let now = self.time.now();
            if campaign.status == CampaignStatus::Active && campaign.is_expired_at(now) {
                campaign.status = CampaignStatus::Expired;
                self.events.emit(CampaignEvent::CampaignExpired {
                    campaign_id: id,
                    timestamp: now,
                });
                marked += 1;
            }
        }

        if marked > 0 {
            info!(marked, "⏰ Expiry sweep marked campaigns");
        }
        marked
    }

    /// Total campaigns ever created; monotonically non-decreasing.
    pub async fn campaign_count(&self) -> u64 {
        self.store.count().await
    }

    /// Read-only snapshot of a campaign record.
    pub async fn get_campaign(&self, campaign_id: CampaignId) -> Result<Campaign> {
        let record = self
            .store
            .get(&campaign_id)
            .await
            .ok_or(CampaignError::NotFound(campaign_id))?;
        let campaign = record.read().await;
        Ok(campaign.clone())
    }
}
