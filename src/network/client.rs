//! HTTP client for the lottery backend - executes the three REST calls

use std::time::Duration;

use serde::Deserialize;

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::ApiError;
use crate::models::StatusSnapshot;

/// Error body returned by the backend on non-2xx
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Typed client for `/status`, `/trigger-draw` and `/reset`
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: create_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /status, decoded into a snapshot
    pub async fn fetch_status(&self) -> Result<StatusSnapshot, ApiError> {
        let resp = self.http.get(self.endpoint("/status")).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), message: None });
        }

        let body = resp.text().await?;
        Ok(StatusSnapshot::from_json(&body)?)
    }

    /// POST /trigger-draw
    pub async fn trigger_draw(&self) -> Result<(), ApiError> {
        self.post_action("/trigger-draw").await
    }

    /// POST /reset
    pub async fn reset(&self) -> Result<(), ApiError> {
        self.post_action("/reset").await
    }

    async fn post_action(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.http.post(self.endpoint(path)).send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // The backend explains rejections in an `error` field
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.error)
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error": "没有参与者"}"#).as_deref(), Some("没有参与者"));
        assert_eq!(error_message(r#"{"message": "ok"}"#), None);
        assert_eq!(error_message("Internal Server Error"), None);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.endpoint("/status"), "http://127.0.0.1:5000/status");
    }
}
