pub mod snapshot_view_model;

pub use snapshot_view_model::{ColumnHeader, DashboardView, GroupView, SnapshotViewModel};
