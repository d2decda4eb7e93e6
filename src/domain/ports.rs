use crate::domain::errors::FetchError;
use crate::domain::market::{OiRecord, TradingDate};
use async_trait::async_trait;

/// Source of daily open-interest snapshots, keyed by calendar date.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Retrieve every record published for `date`, in delivery order.
    async fn fetch_day(&self, date: TradingDate) -> Result<Vec<OiRecord>, FetchError>;
}
