use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::fetch_coordinator::Dataset;
use crate::application::snapshot_service::SnapshotService;
use crate::config::Config;
use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use crate::domain::ports::SnapshotSource;
use crate::infrastructure::SourceFactory;

/// Channels connecting the UI thread to the background snapshot service.
pub struct SystemHandle {
    pub date_tx: watch::Sender<TradingDate>,
    pub refresh_tx: mpsc::Sender<()>,
    pub dataset_rx: watch::Receiver<Arc<Dataset>>,
    pub chunk_size: ChunkSize,
    pub underlying: Underlying,
    pub poll_interval: std::time::Duration,
}

pub struct Application {
    pub config: Config,
    pub source: Arc<dyn SnapshotSource>,
}

impl Application {
    pub fn build(config: Config) -> Result<Self> {
        info!(
            "Building oiboard (Source: {:?}, Underlying: {}, Chunk size: {})...",
            config.source_mode,
            config.underlying,
            config.chunk_size.get()
        );

        let source = SourceFactory::create_source(&config);
        Ok(Self { config, source })
    }

    pub fn with_source(config: Config, source: Arc<dyn SnapshotSource>) -> Self {
        Self { config, source }
    }

    /// Spawns the snapshot service on the current runtime.
    pub fn start(self) -> (SystemHandle, JoinHandle<()>) {
        let initial_date = self.config.initial_date();
        info!("Starting snapshot service for {}...", initial_date);

        let (date_tx, date_rx) = watch::channel(initial_date);
        let (refresh_tx, refresh_rx) = mpsc::channel(4);
        let (dataset_tx, dataset_rx) = watch::channel(Arc::new(Dataset::pending(initial_date)));

        let service = SnapshotService::new(
            self.source,
            self.config.poll_interval,
            date_rx,
            refresh_rx,
            dataset_tx,
        );
        let task = tokio::spawn(service.run());

        let handle = SystemHandle {
            date_tx,
            refresh_tx,
            dataset_rx,
            chunk_size: self.config.chunk_size,
            underlying: self.config.underlying,
            poll_interval: self.config.poll_interval,
        };

        (handle, task)
    }
}
