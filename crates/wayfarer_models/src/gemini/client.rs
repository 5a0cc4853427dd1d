//! HTTP client for the Gemini generateContent endpoint.

use super::dto::{Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument};
use wayfarer_core::{Credential, GenerationConfig};
use wayfarer_error::{ProviderError, ProviderErrorKind};
use wayfarer_interface::GenerationProvider;

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client bound to one model.
///
/// Holds no credential: the key arrives with each call so the credential pool
/// can rotate keys without rebuilding the client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client for `model` against the public Gemini API.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(model, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (proxies, tests).
    #[instrument(skip_all)]
    pub fn with_base_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let model = model.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        debug!(model = %model, url = %base_url, "Created Gemini client");

        Self {
            client: Client::new(),
            model,
            base_url,
        }
    }

    /// Full generateContent URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate_content(
        &self,
        prompt: &str,
        credential: &Credential,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user_text(prompt)])
            .generation_config(*config)
            .build()
            .map_err(|e| {
                ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                    "Failed to build request: {}",
                    e
                )))
            })?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                let message = if e.is_timeout() {
                    format!("Request timeout: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };
                ProviderError::new(ProviderErrorKind::Network(message))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{} ({})", envelope.error.message, code),
                    None => envelope.error.message,
                },
                Err(_) => body,
            };
            error!(status = %status, error = %message, "Gemini API error");

            return Err(ProviderError::new(ProviderErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to decode Gemini response");
            ProviderError::new(ProviderErrorKind::InvalidResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        match parsed.text() {
            Some(text) => {
                debug!(text_len = text.len(), "Received Gemini response");
                Ok(text)
            }
            None => Err(ProviderError::new(ProviderErrorKind::EmptyResponse(
                parsed.empty_reason(),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
