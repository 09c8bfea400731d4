pub mod amount;
pub mod error;
pub mod id;

pub use amount::TokenAmount;
pub use error::{CampaignError, Result};
pub use id::{AccountAddress, CampaignId};
