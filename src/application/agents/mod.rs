// UI-side state for the dashboard window
pub mod dashboard_agent;
