//! Configuration module for oiboard.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: the snapshot endpoint and the dashboard display.

mod display_config;
mod endpoint_config;

pub use display_config::DisplayEnvConfig;
pub use endpoint_config::{
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT_TEMPLATE, EndpointEnvConfig, SourceMode,
};

use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Endpoint
    pub source_mode: SourceMode,
    pub base_url: String,
    pub endpoint_template: String,
    pub request_timeout: Duration,

    // Display
    pub chunk_size: ChunkSize,
    pub underlying: Underlying,
    pub poll_interval: Duration,
    pub start_date: Option<TradingDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self::compose(EndpointEnvConfig::default(), DisplayEnvConfig::default())
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint =
            EndpointEnvConfig::from_lookup(lookup).context("Failed to load endpoint config")?;
        let display =
            DisplayEnvConfig::from_lookup(lookup).context("Failed to load display config")?;

        Ok(Self::compose(endpoint, display))
    }

    fn compose(endpoint: EndpointEnvConfig, display: DisplayEnvConfig) -> Self {
        Self {
            source_mode: endpoint.source_mode,
            base_url: endpoint.base_url,
            endpoint_template: endpoint.endpoint_template,
            request_timeout: endpoint.request_timeout,

            chunk_size: display.chunk_size,
            underlying: display.underlying,
            poll_interval: display.poll_interval,
            start_date: display.start_date,
        }
    }

    /// Date shown when the dashboard opens
    pub fn initial_date(&self) -> TradingDate {
        self.start_date.unwrap_or_else(TradingDate::today)
    }
}
