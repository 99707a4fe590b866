//! Server-side forwarding of filter selections to the analytics backend.

use std::env;
use std::time::Duration;

use dioxus::logger::tracing::{error, info};
use once_cell::sync::OnceCell;

use crate::model::{AnalysisResult, FilterSelection};

const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("ANALYTICS_TIMEOUT_SECS must be a whole number of seconds, got `{0}`")]
    InvalidTimeout(String),
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("analytics service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("analytics service answered {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("analytics response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Proxy settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ProxyConfig {
    pub fn load() -> Result<Self, ProxyError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any variable source; `load` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProxyError> {
        let base_url = lookup("ANALYTICS_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout = match lookup("ANALYTICS_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ProxyError::InvalidTimeout(raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self { base_url, timeout })
    }

    pub fn analysis_url(&self) -> String {
        format!("{}/analysis", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsProxy {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl AnalyticsProxy {
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProxyError::Client)?;
        Ok(Self { client, config })
    }

    /// Process-wide proxy, configured on first use.
    pub fn shared() -> Result<&'static AnalyticsProxy, ProxyError> {
        static PROXY: OnceCell<AnalyticsProxy> = OnceCell::new();
        PROXY.get_or_try_init(|| {
            let config = ProxyConfig::load()?;
            info!(url = %config.analysis_url(), timeout = ?config.timeout, "analytics proxy configured");
            AnalyticsProxy::new(config)
        })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub async fn forward(&self, filters: &FilterSelection) -> Result<AnalysisResult, ProxyError> {
        let url = self.config.analysis_url();
        info!(
            %url,
            position = %filters.position,
            regions = filters.regions.len(),
            sources = filters.sources.len(),
            "forwarding analysis request"
        );

        let response = self
            .client
            .post(&url)
            .json(filters)
            .send()
            .await
            .map_err(ProxyError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let err = ProxyError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
            error!(%err, "analysis request rejected");
            return Err(err);
        }

        response.json::<AnalysisResult>().await.map_err(|err| {
            error!(%err, "analysis response could not be decoded");
            ProxyError::Decode(err)
        })
    }
}
