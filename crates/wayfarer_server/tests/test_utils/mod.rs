//! Test utilities for HTTP API tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use wayfarer_core::{Credential, GenerationConfig};
use wayfarer_error::{ProviderError, ProviderErrorKind};
use wayfarer_fallback::CredentialPool;
use wayfarer_interface::GenerationProvider;

pub const MODEL: &str = "gemini-test";

/// Provider that replays a fixed script of outcomes.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderErrorKind>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<String, ProviderErrorKind>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Raw credential values seen, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate_content(
        &self,
        _prompt: &str,
        credential: &Credential,
        _config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(credential.expose().to_string());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        next.map_err(ProviderError::new)
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        MODEL
    }
}

pub fn pool_of(n: usize) -> CredentialPool {
    CredentialPool::new((1..=n).map(|i| Credential::new(format!("key-{}", i))))
        .expect("non-empty pool")
}

pub fn quota_exceeded() -> ProviderErrorKind {
    ProviderErrorKind::Http {
        status_code: 429,
        message: "Quota exceeded for generate_content requests.".to_string(),
    }
}

pub fn unauthorized() -> ProviderErrorKind {
    ProviderErrorKind::Http {
        status_code: 401,
        message: "API key not valid. Please pass a valid API key.".to_string(),
    }
}

pub const PARIS_ITINERARY: &str = r#"Here you go!
```json
{"summary":"Three days in Paris","destination":"Paris","itineraryTable":[{"day":1,"theme":"Louvre","rows":[]}]}
```"#;
