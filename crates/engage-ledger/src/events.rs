//! Campaign notification stream.
//!
//! External monitors subscribe to a broadcast channel and receive every
//! state-changing notification without polling the ledger.

use crate::campaign::TaskKind;
use engage_types::{AccountAddress, CampaignId, TokenAmount};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of buffered events before the oldest are dropped for slow
/// subscribers.
pub const DEFAULT_EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CampaignEvent {
    /// A campaign was created and its deposit custodied. Carries every
    /// immutable field of the record.
    CampaignCreated {
        campaign_id: CampaignId,
        owner: AccountAddress,
        reward_per_task: TokenAmount,
        total_budget: TokenAmount,
        expires_at: i64,
        task_kind: TaskKind,
        timestamp: i64,
    },

    /// A claimant was rewarded for a completed task.
    TaskCompleted {
        campaign_id: CampaignId,
        claimant: AccountAddress,
        reward: TokenAmount,
        proof: String,
        timestamp: i64,
    },

    /// An active campaign passed its expiry time and was marked Expired.
    CampaignExpired {
        campaign_id: CampaignId,
        timestamp: i64,
    },

    /// The owner withdrew the unclaimed remainder.
    CampaignWithdrawn {
        campaign_id: CampaignId,
        owner: AccountAddress,
        refund: TokenAmount,
        timestamp: i64,
    },
}

impl CampaignEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CampaignEvent::CampaignCreated { .. } => "campaign_created",
            CampaignEvent::TaskCompleted { .. } => "task_completed",
            CampaignEvent::CampaignExpired { .. } => "campaign_expired",
            CampaignEvent::CampaignWithdrawn { .. } => "campaign_withdrawn",
        }
    }

    pub fn campaign_id(&self) -> CampaignId {
        match self {
            CampaignEvent::CampaignCreated { campaign_id, .. }
            | CampaignEvent::TaskCompleted { campaign_id, .. }
            | CampaignEvent::CampaignExpired { campaign_id, .. }
            | CampaignEvent::CampaignWithdrawn { campaign_id, .. } => *campaign_id,
        }
    }
}

/// Broadcast bus for campaign notifications.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CampaignEvent>,
    emitted: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self {
            tx,
            emitted: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CampaignEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers. Having no subscribers is normal;
    /// the event is dropped.
    pub fn emit(&self, event: CampaignEvent) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        match self.tx.send(event.clone()) {
            Ok(subscribers) => {
                debug!(
                    event_type = event.event_type(),
                    campaign_id = %event.campaign_id(),
                    subscribers,
                    "Event emitted"
                );
            }
            Err(_) => {
                debug!(
                    event_type = event.event_type(),
                    "Event emitted but no subscribers listening"
                );
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn total_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expired_event() -> CampaignEvent {
        let owner = AccountAddress::from_bytes([1; 32]);
        CampaignEvent::CampaignExpired {
            campaign_id: CampaignId::derive(&owner, 0, 0),
            timestamp: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_subscribe_and_emit() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(expired_event());

        let received = rx.try_recv().unwrap();
        assert_eq!(received.event_type(), "campaign_expired");
        assert_eq!(bus.total_emitted(), 1);
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_counted() {
        let bus = EventBus::default();
        bus.emit(expired_event());
        assert_eq!(bus.total_emitted(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(expired_event()).unwrap();
        assert_eq!(json["type"], "CampaignExpired");
        assert_eq!(json["data"]["timestamp"], 1_700_000_000);
    }
}
