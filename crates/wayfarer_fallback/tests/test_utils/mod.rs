//! Test utilities for credential pool tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use wayfarer_core::{Credential, GenerationConfig};
use wayfarer_error::{ProviderError, ProviderErrorKind};
use wayfarer_interface::GenerationProvider;

/// Provider that replays a fixed script of outcomes and records which
/// credentials it was called with.
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
        "scripted-model"
    }
}

pub fn pool_of(n: usize) -> wayfarer_fallback::CredentialPool {
    wayfarer_fallback::CredentialPool::new(
        (1..=n).map(|i| Credential::new(format!("key-{}", i))),
    )
    .expect("non-empty pool")
}

pub fn quota_exceeded() -> ProviderErrorKind {
    ProviderErrorKind::Http {
        status_code: 429,
        message: "Resource has been exhausted (e.g. check quota).".to_string(),
    }
}

pub fn bad_request() -> ProviderErrorKind {
    ProviderErrorKind::Http {
        status_code: 400,
        message: "Request contains an invalid argument.".to_string(),
    }
}
