use anyhow::{bail, Result};
use async_trait::async_trait;
use engage_types::{AccountAddress, TokenAmount};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Custody boundary for campaign funds.
///
/// `custody` is invoked once at creation with the funding deposit; `release`
/// pays a reward or the final withdrawal remainder. Both are all-or-nothing:
/// an `Err` means no value moved. The ledger treats implementations as
/// opaque, non-reentering side effects and always mutates campaign state
/// before calling `release`.
#[async_trait]
pub trait FundTransferGateway: Send + Sync {
    async fn custody(&self, amount: TokenAmount, from: AccountAddress) -> Result<()>;
    async fn release(&self, amount: TokenAmount, to: AccountAddress) -> Result<()>;
}

/// In-process gateway used by tests and embedders without a real custodian.
/// Tracks the custodied pool and the aggregate released per account.
pub struct MemoryGateway {
    custodied: Arc<RwLock<TokenAmount>>,
    released: Arc<RwLock<HashMap<AccountAddress, TokenAmount>>>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            custodied: Arc::new(RwLock::new(TokenAmount::ZERO)),
            released: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn custodied_total(&self) -> TokenAmount {
        *self.custodied.read().await
    }

    pub async fn released_to(&self, account: &AccountAddress) -> TokenAmount {
        let released = self.released.read().await;
        released.get(account).copied().unwrap_or(TokenAmount::ZERO)
    }
}

#[async_trait]
impl FundTransferGateway for MemoryGateway {
    async fn custody(&self, amount: TokenAmount, from: AccountAddress) -> Result<()> {
        let mut custodied = self.custodied.write().await;
        *custodied = match custodied.checked_add(amount) {
            Some(total) => total,
            None => bail!("custodied pool overflow"),
        };

        info!(
            from = %from,
            amount = amount.to_base_units(),
            pool = custodied.to_base_units(),
            "💰 Deposit custodied"
        );
        Ok(())
    }

    async fn release(&self, amount: TokenAmount, to: AccountAddress) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }

        let mut custodied = self.custodied.write().await;
        let remaining = match custodied.checked_sub(amount) {
            Some(remaining) => remaining,
            None => bail!(
                "release of {} exceeds custodied pool {}",
                amount,
                *custodied
            ),
        };
        *custodied = remaining;

        let mut released = self.released.write().await;
        let entry = released.entry(to).or_insert(TokenAmount::ZERO);
        *entry = match entry.checked_add(amount) {
            Some(total) => total,
            None => bail!("released total overflow for {}", to),
        };

        info!(
            to = %to,
            amount = amount.to_base_units(),
            pool = remaining.to_base_units(),
            "💸 Funds released"
        );
        Ok(())
    }
}
