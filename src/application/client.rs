use crate::application::date_state::DateState;
use crate::application::fetch_coordinator::Dataset;
use crate::application::system::SystemHandle;
use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use anyhow::Result;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// A client interface for the snapshot service.
/// Abstracts away channel management and provides a clean API for the UI.
pub struct DashboardClient {
    log_rx: Receiver<String>,
    date_state: DateState,
    refresh_tx: mpsc::Sender<()>,
    dataset_rx: watch::Receiver<Arc<Dataset>>,
    default_chunk_size: ChunkSize,
    default_underlying: Underlying,
    poll_interval: Duration,
}

impl DashboardClient {
    pub fn new(handle: SystemHandle, log_rx: Receiver<String>) -> Self {
        Self {
            log_rx,
            date_state: DateState::from_sender(handle.date_tx),
            refresh_tx: handle.refresh_tx,
            dataset_rx: handle.dataset_rx,
            default_chunk_size: handle.chunk_size,
            default_underlying: handle.underlying,
            poll_interval: handle.poll_interval,
        }
    }

    /// Next captured log line, if any. Non-blocking.
    pub fn poll_log(&self) -> Option<String> {
        self.log_rx.try_recv().ok()
    }

    pub fn date_state(&self) -> &DateState {
        &self.date_state
    }

    pub fn selected_date(&self) -> TradingDate {
        self.date_state.selected()
    }

    pub fn select_date(&self, date: TradingDate) -> bool {
        self.date_state.select(date)
    }

    /// Snapshot currently on display
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset_rx.borrow())
    }

    pub fn request_refresh(&self) -> Result<()> {
        self.refresh_tx
            .try_send(())
            .map_err(|e| anyhow::anyhow!("Failed to request refresh: {}", e))
    }

    pub fn default_chunk_size(&self) -> ChunkSize {
        self.default_chunk_size
    }

    pub fn default_underlying(&self) -> Underlying {
        self.default_underlying
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
