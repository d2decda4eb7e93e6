//! Snapshot endpoint configuration parsing from environment variables.
//!
//! This module handles where daily snapshot files are fetched from and how.

use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "/load-json/:date";

/// Where snapshots come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Http,
    Mock,
}

impl FromStr for SourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(SourceMode::Http),
            "mock" => Ok(SourceMode::Mock),
            _ => anyhow::bail!("Invalid SOURCE_MODE: {}. Must be 'http' or 'mock'", s),
        }
    }
}

/// Snapshot endpoint environment configuration
#[derive(Debug, Clone)]
pub struct EndpointEnvConfig {
    pub source_mode: SourceMode,
    pub base_url: String,
    /// Path template; `:date` is replaced with `<YYYY-MM-DD>.json`
    pub endpoint_template: String,
    pub request_timeout: Duration,
}

impl Default for EndpointEnvConfig {
    fn default() -> Self {
        Self {
            source_mode: SourceMode::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EndpointEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_mode = lookup("SOURCE_MODE")
            .unwrap_or_else(|| "http".to_string())
            .parse::<SourceMode>()?;

        let base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let endpoint_template = lookup("ENDPOINT_TEMPLATE")
            .unwrap_or_else(|| DEFAULT_ENDPOINT_TEMPLATE.to_string());
        if !endpoint_template.contains(":date") {
            anyhow::bail!(
                "Invalid ENDPOINT_TEMPLATE: {}. Must contain a ':date' placeholder",
                endpoint_template
            );
        }

        let timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("Failed to parse HTTP_TIMEOUT_SECS")?;

        Ok(Self {
            source_mode,
            base_url,
            endpoint_template,
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}
