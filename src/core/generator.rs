use crate::core::{ConfigProvider, TextGenerator};
use crate::utils::error::{Result, SupplyError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(rename = "generatedText")]
    generated_text: Option<String>,
    error: Option<String>,
}

/// Generation service reached over HTTP.
///
/// Sends `{"prompt": ...}` and expects `{"generatedText": ...}` back; an
/// `error` field or a non-success status is a failed generation.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
}

impl HttpGenerator {
    pub fn new(endpoint: String, headers: HashMap<String, String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.endpoint().to_string(),
            config.headers(),
            config.timeout_seconds(),
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Making generation request to: {}", self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GenerationRequest { prompt });
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Generation response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(SupplyError::GenerationFailed {
                message: format!("service returned {}: {}", status, body.trim()),
            });
        }

        let parsed: GenerationResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error {
            return Err(SupplyError::GenerationFailed { message: error });
        }

        match parsed.generated_text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SupplyError::GenerationFailed {
                message: "response did not contain any generated text".to_string(),
            }),
        }
    }
}
