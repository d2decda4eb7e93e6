//! Dashboard display configuration parsing from environment variables.
//!
//! Group size, underlying selection, polling cadence and the initial date.

use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use anyhow::{Context, Result};
use std::time::Duration;

/// Display environment configuration
#[derive(Debug, Clone)]
pub struct DisplayEnvConfig {
    pub chunk_size: ChunkSize,
    pub underlying: Underlying,
    pub poll_interval: Duration,
    /// `None` means "today" at startup
    pub start_date: Option<TradingDate>,
}

impl Default for DisplayEnvConfig {
    fn default() -> Self {
        Self {
            chunk_size: ChunkSize::default(),
            underlying: Underlying::default(),
            poll_interval: Duration::from_secs(60),
            start_date: None,
        }
    }
}

impl DisplayEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chunk_size = lookup("DEFAULT_CHUNK_SIZE")
            .unwrap_or_else(|| ChunkSize::DEFAULT.to_string())
            .parse::<i64>()
            .map(ChunkSize::clamped)
            .context("Failed to parse DEFAULT_CHUNK_SIZE")?;

        let underlying = match lookup("UNDERLYING") {
            Some(raw) => raw.parse::<Underlying>()?,
            None => Underlying::default(),
        };

        let poll_secs = lookup("POLL_INTERVAL_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("Failed to parse POLL_INTERVAL_SECS")?;

        let start_date = lookup("START_DATE")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.parse::<TradingDate>())
            .transpose()?;

        Ok(Self {
            chunk_size,
            underlying,
            poll_interval: Duration::from_secs(poll_secs.max(1)),
            start_date,
        })
    }
}
