//! HTTP client for the monitoring backend.
//!
//! Endpoints (relative to `MONITOR_API_URL`):
//! - `GET /hosts`, `POST /hosts`, `DELETE /hosts/{ip}`
//! - `POST /refresh`
//! - `GET /metrics`, `GET /health`
//!
//! Read-only calls are retried on transport errors and 5xx responses.
//! Mutations are sent once.

use crate::config::Config;
use crate::metrics::MetricsSnapshot;
use crate::retry::{with_retry, RetryConfig, Retryable};
use crate::validation::is_valid_ip;
use anyhow::Context;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, timeout, ...)
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Rejected before sending
    #[error("Invalid host: {0}")]
    InvalidHost(String),
}

/// Transport failures and server errors may succeed on a later attempt.
impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Backend { status, .. } => *status >= 500,
            ApiError::Decode { .. } | ApiError::InvalidHost(_) => false,
        }
    }
}

/// Row of `GET /hosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSummary {
    pub ip: String,
    pub username: String,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Body of `POST /hosts`.
#[derive(Clone, Serialize)]
pub struct NewHost {
    pub ip: String,
    pub username: String,
    pub password: String,
}

impl NewHost {
    pub fn new(ip: &str, username: &str, password: &str) -> Self {
        Self {
            ip: ip.trim().to_string(),
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }

    /// Check the form the same way the backend does before sending it.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.ip.is_empty() || self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::InvalidHost("ip, username and password are required".to_string()));
        }
        if !is_valid_ip(&self.ip) {
            return Err(ApiError::InvalidHost(format!("'{}' is not an IPv4 address", self.ip)));
        }
        Ok(())
    }
}

impl fmt::Debug for NewHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewHost")
            .field("ip", &self.ip)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `{"message": ...}` answer of mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub hosts_count: usize,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Answer of the service root (`GET /` outside the API prefix).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceInfo {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub hosts_count: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    root_url: String,
    retry: RetryConfig,
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            root_url: config.service_root_url().to_string(),
            retry: RetryConfig::api_call(),
        })
    }

    /// Replace the retry policy for read-only calls.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_hosts(&self) -> Result<Vec<HostSummary>, ApiError> {
        self.get("/hosts").await
    }

    pub async fn add_host(&self, host: &NewHost) -> Result<MessageResponse, ApiError> {
        host.validate()?;
        let response = self.send(Method::POST, &self.url("/hosts"), Some(host)).await?;
        info!("Added host {}", host.ip);
        Ok(response)
    }

    pub async fn delete_host(&self, ip: &str) -> Result<MessageResponse, ApiError> {
        let response = self
            .send::<MessageResponse, ()>(Method::DELETE, &self.url(&format!("/hosts/{}", ip)), None)
            .await?;
        info!("Deleted host {}", ip);
        Ok(response)
    }

    /// Ask the backend to collect a fresh sample from every host.
    pub async fn refresh_metrics(&self) -> Result<MessageResponse, ApiError> {
        self.send::<MessageResponse, ()>(Method::POST, &self.url("/refresh"), None)
            .await
    }

    pub async fn get_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        self.get("/metrics").await
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }

    pub async fn service_info(&self) -> Result<ServiceInfo, ApiError> {
        let url = format!("{}/", self.root_url);
        with_retry(&self.retry, "GET /", || {
            self.send::<ServiceInfo, ()>(Method::GET, &url, None)
        })
        .await
    }

    /// Whether the backend answers at all. Never fails.
    pub async fn check_api(&self) -> bool {
        match self.service_info().await {
            Ok(info) => {
                info!("✅ Backend available: {} {} ({} hosts)", info.service, info.version, info.hosts_count);
                true
            }
            Err(e) => {
                warn!("❌ Backend unavailable: {}", e);
                false
            }
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        with_retry(&self.retry, &format!("GET {}", endpoint), || {
            self.send::<T, ()>(Method::GET, &url, None)
        })
        .await
    }

    async fn send<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("📡 {} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
