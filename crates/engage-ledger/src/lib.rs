//! Ledger for advertiser-funded engagement campaigns.
//!
//! An advertiser deposits a fixed budget, users earn a fixed per-task reward
//! after proof validation, and the unspent remainder returns to the
//! advertiser once the campaign expires. The ledger enforces exactly-once
//! claims per identity, budget bounds, and monotone
//! Active -> Expired -> Withdrawn transitions; custody of value and proof
//! policy sit behind injected traits.

pub mod campaign;
pub mod config;
pub mod events;
pub mod gateway;
pub mod ledger;
pub mod store;
pub mod time;
pub mod verifier;

pub use campaign::{Campaign, CampaignStatus, TaskKind};
pub use config::LedgerConfig;
pub use events::{CampaignEvent, EventBus};
pub use gateway::{FundTransferGateway, MemoryGateway};
pub use ledger::CampaignLedger;
pub use store::CampaignStore;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use verifier::{MinLengthVerifier, ProofVerifier};

pub use engage_types::{AccountAddress, CampaignError, CampaignId, TokenAmount};
