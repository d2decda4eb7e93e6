// Agent modules - UI-facing state
pub mod agents;

// Selected date and snapshot polling
pub mod date_state;
pub mod fetch_coordinator;
pub mod snapshot_service;

// System orchestrator
pub mod client;
pub mod system;
