use crate::application::fetch_coordinator::{Dataset, FetchCoordinator, FetchTicket};
use crate::domain::market::{OiRecord, TradingDate};
use crate::domain::ports::SnapshotSource;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Fetches `date`, folding every failure into an empty list.
pub async fn fetch_or_empty(source: &dyn SnapshotSource, date: TradingDate) -> Vec<OiRecord> {
    match source.fetch_day(date).await {
        Ok(records) => records,
        Err(e) => {
            warn!("No snapshot for {}: {}", date, e);
            Vec::new()
        }
    }
}

#[derive(Debug)]
struct FetchCompletion {
    ticket: FetchTicket,
    records: Vec<OiRecord>,
}

/// Keeps the displayed dataset in step with the selected date.
///
/// Fetches on startup, on every date change, on manual refresh and on each
/// poll tick. This loop is the only writer of the dataset channel.
pub struct SnapshotService {
    source: Arc<dyn SnapshotSource>,
    poll_interval: Duration,
    coordinator: FetchCoordinator,
    date_rx: watch::Receiver<TradingDate>,
    refresh_rx: mpsc::Receiver<()>,
    dataset_tx: watch::Sender<Arc<Dataset>>,
}

impl SnapshotService {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        poll_interval: Duration,
        date_rx: watch::Receiver<TradingDate>,
        refresh_rx: mpsc::Receiver<()>,
        dataset_tx: watch::Sender<Arc<Dataset>>,
    ) -> Self {
        Self {
            source,
            poll_interval,
            coordinator: FetchCoordinator::new(),
            date_rx,
            refresh_rx,
            dataset_tx,
        }
    }

    pub async fn run(mut self) {
        info!(
            "SnapshotService started. Poll interval: {:?}",
            self.poll_interval
        );

        let (completion_tx, mut completion_rx) = mpsc::channel::<FetchCompletion>(16);
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // The first tick completes immediately and performs the initial fetch
                _ = interval.tick() => {
                    self.dispatch(&completion_tx, "poll");
                }
                changed = self.date_rx.changed() => {
                    if changed.is_err() {
                        info!("SnapshotService: date channel closed, stopping.");
                        break;
                    }
                    self.date_rx.mark_unchanged();
                    interval.reset();
                    self.dispatch(&completion_tx, "date change");
                }
                Some(()) = self.refresh_rx.recv() => {
                    self.dispatch(&completion_tx, "refresh");
                }
                Some(completion) = completion_rx.recv() => {
                    self.apply(completion);
                }
            }
        }
    }

    // Reads the date without marking it seen, so a change that races a poll
    // tick still reaches the date-change branch.
    fn dispatch(&mut self, completion_tx: &mpsc::Sender<FetchCompletion>, reason: &str) {
        let date = *self.date_rx.borrow();
        self.publish_pending(date);
        let ticket = self.coordinator.issue(date);
        debug!("Requesting snapshot #{} for {} ({})", ticket.seq, date, reason);

        let source = Arc::clone(&self.source);
        let completion_tx = completion_tx.clone();
        tokio::spawn(async move {
            let records = fetch_or_empty(source.as_ref(), ticket.date).await;
            // Receiver only goes away when the service stops
            let _ = completion_tx.send(FetchCompletion { ticket, records }).await;
        });
    }

    /// Clears the previous date's rows as soon as a request for a new date goes out.
    fn publish_pending(&self, date: TradingDate) {
        self.dataset_tx.send_if_modified(|current| {
            if current.date == date {
                return false;
            }
            *current = Arc::new(Dataset::pending(date));
            true
        });
    }

    fn apply(&mut self, completion: FetchCompletion) {
        let FetchCompletion { ticket, records } = completion;
        let count = records.len();

        if let Some(dataset) = self.coordinator.complete(ticket, records, Local::now()) {
            debug!(
                "Applied snapshot #{} for {} ({} records)",
                dataset.seq, dataset.date, count
            );
            self.dataset_tx.send_replace(Arc::new(dataset));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::MockSnapshotSource;

    #[tokio::test]
    async fn test_fetch_or_empty_swallows_errors() {
        let source = MockSnapshotSource::new();
        let date = TradingDate::from_ymd(2023, 7, 30).unwrap();
        source.fail_on(date).await;

        assert!(fetch_or_empty(&source, date).await.is_empty());
        // Unseeded dates are missing, which is also "no data"
        let other = TradingDate::from_ymd(2023, 7, 31).unwrap();
        assert!(fetch_or_empty(&source, other).await.is_empty());
    }

    #[tokio::test]
    async fn test_poll_racing_a_date_change_keeps_the_change_visible() {
        let first = TradingDate::from_ymd(2023, 7, 27).unwrap();
        let second = TradingDate::from_ymd(2023, 7, 28).unwrap();

        let source = MockSnapshotSource::new();
        source.insert_day(first, Vec::new()).await;
        let loaded = Dataset {
            date: first,
            seq: 1,
            records: Arc::from(Vec::new()),
            fetched_at: Some(Local::now()),
        };

        let (date_tx, date_rx) = watch::channel(first);
        let (_refresh_tx, refresh_rx) = mpsc::channel(1);
        let (dataset_tx, dataset_rx) = watch::channel(Arc::new(loaded));
        let (completion_tx, _completion_rx) = mpsc::channel(4);
        let mut service = SnapshotService::new(
            Arc::new(source),
            Duration::from_secs(3600),
            date_rx,
            refresh_rx,
            dataset_tx,
        );

        // New date lands in the same round as a poll tick, and the poll runs first
        date_tx.send_replace(second);
        service.dispatch(&completion_tx, "poll");

        let shown = Arc::clone(&dataset_rx.borrow());
        assert_eq!(shown.date, second);
        assert!(!shown.is_loaded());
        assert!(service.date_rx.has_changed().unwrap());
    }
}
