use crate::config::{Config, SourceMode};
use crate::domain::ports::SnapshotSource;
use crate::infrastructure::mock::MockSnapshotSource;
use crate::infrastructure::nse_snapshot::HttpSnapshotSource;
use std::sync::Arc;
use tracing::info;

pub struct SourceFactory;

impl SourceFactory {
    /// Builds the snapshot source selected by `SOURCE_MODE`.
    pub fn create_source(config: &Config) -> Arc<dyn SnapshotSource> {
        match config.source_mode {
            SourceMode::Http => {
                info!(
                    "Snapshot source: HTTP {}{}",
                    config.base_url, config.endpoint_template
                );
                Arc::new(HttpSnapshotSource::from_config(config))
            }
            SourceMode::Mock => {
                info!("Snapshot source: generated demo data");
                Arc::new(MockSnapshotSource::demo())
            }
        }
    }
}
