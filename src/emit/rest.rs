//! DataHub GMS REST emitter
//!
//! Posts snapshot events to `{endpoint}/entities?action=ingest` using the
//! Rest.li 2.0 protocol, retrying throttled and unavailable responses with
//! exponential backoff.

use super::{EmitError, MetadataEmitter};
use crate::config::DatahubSection;
use crate::models::{DATASET_SNAPSHOT_TYPE, MetadataChangeEvent};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

const RESTLI_PROTOCOL_HEADER: &str = "X-RestLi-Protocol-Version";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";
const INGEST_PATH: &str = "/entities?action=ingest";
const CONFIG_PATH: &str = "/config";

/// Statuses worth retrying: throttling and gateway/availability failures
const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Configuration for connecting to DataHub GMS.
#[derive(Debug, Clone)]
pub struct RestEmitterConfig {
    /// Base URL of GMS (e.g., `http://localhost:8080`).
    pub endpoint: String,
    /// Optional bearer token for authenticated access.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_backoff_ms: u64,
}

impl RestEmitterConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let defaults = DatahubSection::default();
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: defaults.timeout_secs,
            max_retries: defaults.max_retries,
            retry_backoff_ms: defaults.retry_backoff_ms,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_ms = backoff_ms;
        self
    }
}

impl From<&DatahubSection> for RestEmitterConfig {
    fn from(section: &DatahubSection) -> Self {
        Self {
            endpoint: section.endpoint.trim_end_matches('/').to_string(),
            token: section.token.clone(),
            timeout_secs: section.timeout_secs,
            max_retries: section.max_retries,
            retry_backoff_ms: section.retry_backoff_ms,
        }
    }
}

/// DataHub REST emitter.
pub struct RestEmitter {
    config: RestEmitterConfig,
    client: Client,
}

impl RestEmitter {
    pub fn new(config: RestEmitterConfig) -> Result<Self, EmitError> {
        if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
            return Err(EmitError::Config(format!(
                "DataHub endpoint must be an http(s) URL, got '{}'",
                config.endpoint
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmitError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.endpoint, path);
        let mut req = self
            .client
            .request(method, &url)
            .header(RESTLI_PROTOCOL_HEADER, RESTLI_PROTOCOL_VERSION);
        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.retry_backoff_ms.saturating_mul(1 << attempt.min(16)))
    }

    /// Send a request, retrying retryable failures
    async fn send_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, EmitError> {
        let mut attempt = 0;
        loop {
            let mut req = self.request(method.clone(), path);
            if let Some(body) = body {
                req = req.json(body);
            }

            let retry_reason = match req.send().await {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => {
                    let status = resp.status();
                    let text = resp.text().await.unwrap_or_default();
                    if !RETRY_STATUSES.contains(&status) || attempt >= self.config.max_retries {
                        return Err(classify_status(status, text));
                    }
                    format!("HTTP {}", status)
                }
                Err(e) => {
                    if !(e.is_connect() || e.is_timeout()) || attempt >= self.config.max_retries {
                        return Err(EmitError::Connection(e.to_string()));
                    }
                    e.to_string()
                }
            };

            let delay = self.backoff(attempt);
            attempt += 1;
            warn!(
                "Request to {}{} failed ({}); retry {}/{} in {:?}",
                self.config.endpoint, path, retry_reason, attempt, self.config.max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn classify_status(status: StatusCode, body: String) -> EmitError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        EmitError::Auth {
            status: status.as_u16(),
            body,
        }
    } else {
        EmitError::Http {
            status: status.as_u16(),
            body,
        }
    }
}

/// Rest.li ingest payload for a snapshot event
pub fn ingest_payload(event: &MetadataChangeEvent) -> Result<Value, EmitError> {
    let snapshot = serde_json::to_value(&event.proposed_snapshot)
        .map_err(|e| EmitError::Serialization(e.to_string()))?;
    Ok(json!({
        "entity": {
            "value": {
                DATASET_SNAPSHOT_TYPE: snapshot
            }
        }
    }))
}

#[async_trait]
impl MetadataEmitter for RestEmitter {
    async fn emit(&self, event: &MetadataChangeEvent) -> Result<(), EmitError> {
        let payload = ingest_payload(event)?;
        self.send_with_retry(Method::POST, INGEST_PATH, Some(&payload))
            .await?;
        debug!("Ingested {} into {}", event.urn(), self.config.endpoint);
        Ok(())
    }

    async fn test_connection(&self) -> Result<(), EmitError> {
        let resp = self.send_with_retry(Method::GET, CONFIG_PATH, None).await?;
        let config: Value = resp
            .json()
            .await
            .map_err(|e| EmitError::InvalidResponse(e.to_string()))?;

        match config.as_object() {
            Some(obj) if obj.contains_key("noCode") => Ok(()),
            _ => Err(EmitError::InvalidResponse(format!(
                "{} does not look like a DataHub GMS endpoint",
                self.config.endpoint
            ))),
        }
    }
}
