pub mod factory;
pub mod http_client_factory;
pub mod mock;
pub mod nse_snapshot;

pub use factory::SourceFactory;
pub use mock::MockSnapshotSource;
pub use nse_snapshot::HttpSnapshotSource;
