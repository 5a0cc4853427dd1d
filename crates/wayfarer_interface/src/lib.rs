//! Trait definitions for the Wayfarer service.
//!
//! The planner never talks to a concrete backend; it drives any
//! [`GenerationProvider`] through the credential pool.

use async_trait::async_trait;
use std::sync::Arc;
use wayfarer_core::{Credential, GenerationConfig};
use wayfarer_error::ProviderError;

/// Outbound contract to a remote text-generation backend.
///
/// One call is one attempt with one credential. Implementations must not
/// retry internally: the credential pool decides what happens after a failure.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for `prompt` using `credential`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] carrying the HTTP status (when there was
    /// one) and the provider's message, so the failure can be classified.
    async fn generate_content(
        &self,
        prompt: &str,
        credential: &Credential,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Model identifier reported in result metadata.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<P> GenerationProvider for Arc<P>
where
    P: GenerationProvider + ?Sized,
{
    async fn generate_content(
        &self,
        prompt: &str,
        credential: &Credential,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        (**self).generate_content(prompt, credential, config).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
