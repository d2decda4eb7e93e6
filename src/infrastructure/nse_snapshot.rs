use crate::config::Config;
use crate::domain::errors::FetchError;
use crate::domain::market::{OiRecord, TradingDate};
use crate::domain::ports::SnapshotSource;
use crate::infrastructure::http_client_factory::{HttpClientFactory, interpolate_url_template};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Reads `<base><template>` with `:date` substituted by `<YYYY-MM-DD>.json`.
pub struct HttpSnapshotSource {
    client: Client,
    base_url: String,
    endpoint_template: String,
}

impl HttpSnapshotSource {
    pub fn new(client: Client, base_url: &str, endpoint_template: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint_template: endpoint_template.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HttpClientFactory::create_client(config.request_timeout),
            &config.base_url,
            &config.endpoint_template,
        )
    }

    pub fn snapshot_url(&self, date: TradingDate) -> Result<Url, FetchError> {
        let template = if self.endpoint_template.starts_with('/') {
            format!("{}{}", self.base_url, self.endpoint_template)
        } else {
            format!("{}/{}", self.base_url, self.endpoint_template)
        };
        let raw = interpolate_url_template(&template, &[("date", &date.file_name())]);

        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_day(&self, date: TradingDate) -> Result<Vec<OiRecord>, FetchError> {
        let url = self.snapshot_url(date)?;
        debug!("HttpSnapshotSource: GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::Missing {
                date: date.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let records: Vec<OiRecord> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        info!("Fetched {} snapshot records for {}", records.len(), date);
        Ok(records)
    }
}
