use crate::application::client::DashboardClient;
use crate::application::fetch_coordinator::Dataset;
use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use std::sync::Arc;
use tracing::warn;

const MAX_LOG_LINES: usize = 500;

/// UI-side state of the dashboard: the user's selections and the captured
/// log stream. Holds no derived data; tables are rebuilt from the current
/// dataset every frame.
pub struct DashboardAgent {
    pub client: DashboardClient,
    pub chunk_size: ChunkSize,
    pub underlying: Underlying,

    // Date entry box
    pub date_input: String,
    pub date_input_error: Option<String>,

    pub log_history: Vec<String>,
    pub show_logs: bool,
}

impl DashboardAgent {
    pub fn new(client: DashboardClient) -> Self {
        let date_input = client.selected_date().to_string();
        Self {
            chunk_size: client.default_chunk_size(),
            underlying: client.default_underlying(),
            client,
            date_input,
            date_input_error: None,
            log_history: Vec::new(),
            show_logs: true,
        }
    }

    /// Drain pending log lines into the history
    pub fn update(&mut self) {
        while let Some(line) = self.client.poll_log() {
            self.log_history.push(line.trim_end().to_string());
        }

        if self.log_history.len() > MAX_LOG_LINES {
            let excess = self.log_history.len() - MAX_LOG_LINES;
            self.log_history.drain(0..excess);
        }
    }

    pub fn dataset(&self) -> Arc<Dataset> {
        self.client.dataset()
    }

    pub fn selected_date(&self) -> TradingDate {
        self.client.selected_date()
    }

    /// Parses the date entry box and selects it.
    pub fn apply_date_input(&mut self) -> bool {
        match self.date_input.parse::<TradingDate>() {
            Ok(date) => {
                self.date_input_error = None;
                self.date_input = date.to_string();
                self.client.select_date(date)
            }
            Err(e) => {
                self.date_input_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn select_date(&mut self, date: TradingDate) {
        self.client.select_date(date);
        self.date_input = date.to_string();
        self.date_input_error = None;
    }

    pub fn previous_day(&mut self) {
        let date = self.client.date_state().step_back();
        self.date_input = date.to_string();
        self.date_input_error = None;
    }

    pub fn next_day(&mut self) {
        let date = self.client.date_state().step_forward();
        self.date_input = date.to_string();
        self.date_input_error = None;
    }

    pub fn set_chunk_size(&mut self, requested: i64) {
        self.chunk_size = ChunkSize::clamped(requested);
    }

    pub fn refresh(&self) {
        if let Err(e) = self.client.request_refresh() {
            warn!("{}", e);
        }
    }
}
