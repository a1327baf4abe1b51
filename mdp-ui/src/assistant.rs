//! AI-assistant backend client
//!
//! Thin proxy to an external text-generation service. The platform has no
//! hard dependency on it: when no backend is configured the API layer
//! answers 503 and everything else keeps working.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Assistant client errors
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Backend returned an error response
    #[error("Backend error {0}: {1}")]
    BackendError(u16, String),

    /// Failed to parse the backend response
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: String,
}

/// Client for the configured assistant backend
#[derive(Clone)]
pub struct AssistantClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AssistantClient {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a prompt and return the generated text
    pub async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!("{}/generate", self.base_url);

        tracing::debug!(url = %url, prompt_len = prompt.len(), "Querying assistant backend");

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::BackendError(status.as_u16(), error_text));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::ParseError(e.to_string()))?;

        Ok(generated.text)
    }
}
