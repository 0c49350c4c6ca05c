//! Analysis service client
//!
//! Sends a repository URL to the remote analysis service and decodes the
//! returned progress snapshot.

use crate::model::fetch::DEFAULT_FAILURE_MESSAGE;
use crate::model::{FetchError, ProgressSnapshot};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANALYZE_PATH: &str = "/api/repo/analyze";

/// Boundary to the service that turns a repository URL into a snapshot.
///
/// Implementations block; callers run them off the UI thread.
pub trait AnalysisClient: Send + Sync {
    fn analyze(&self, repo_url: &str) -> Result<ProgressSnapshot, FetchError>;
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    repo_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// HTTP implementation talking to `POST {service_url}/api/repo/analyze`
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    endpoint: String,
    client: Client,
}

impl HttpAnalysisClient {
    pub fn new(service_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("conductor-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: analyze_endpoint(service_url),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalysisClient for HttpAnalysisClient {
    fn analyze(&self, repo_url: &str) -> Result<ProgressSnapshot, FetchError> {
        debug!(endpoint = %self.endpoint, repo_url, "posting analysis request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { repo_url })
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(FetchError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        decode_snapshot(&body)
    }
}

/// Join the service base URL and the analyze path
pub fn analyze_endpoint(service_url: &str) -> String {
    format!("{}{}", service_url.trim().trim_end_matches('/'), ANALYZE_PATH)
}

/// Decode a success body into a snapshot
pub fn decode_snapshot(body: &str) -> Result<ProgressSnapshot, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Extract the human-readable `detail` from an error body.
///
/// Falls back to a generic message when the body has no usable detail.
pub fn error_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);

    match detail {
        Some(serde_json::Value::String(message)) if !message.trim().is_empty() => message,
        Some(serde_json::Value::Null) | None => DEFAULT_FAILURE_MESSAGE.to_string(),
        Some(serde_json::Value::String(_)) => DEFAULT_FAILURE_MESSAGE.to_string(),
        Some(other) => other.to_string(),
    }
}
