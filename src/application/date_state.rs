use crate::domain::market::TradingDate;
use tokio::sync::watch;
use tracing::info;

/// Owns the selected date. Every change is published to the snapshot
/// service, which refetches for the new date.
pub struct DateState {
    tx: watch::Sender<TradingDate>,
}

impl DateState {
    pub fn from_sender(tx: watch::Sender<TradingDate>) -> Self {
        Self { tx }
    }

    pub fn selected(&self) -> TradingDate {
        *self.tx.borrow()
    }

    /// Selects `date`. Returns `false` (and notifies nobody) if it was
    /// already selected.
    pub fn select(&self, date: TradingDate) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == date {
                return false;
            }
            *current = date;
            true
        });
        if changed {
            info!("Selected date: {}", date);
        }
        changed
    }

    pub fn step_back(&self) -> TradingDate {
        let date = self.selected().previous();
        self.select(date);
        date
    }

    pub fn step_forward(&self) -> TradingDate {
        let date = self.selected().next();
        self.select(date);
        date
    }
}
