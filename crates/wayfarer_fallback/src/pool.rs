//! Ordered credential pool.

use derive_getters::Getters;
use tracing::{debug, error, instrument, warn};
use wayfarer_core::{Credential, GenerationConfig};
use wayfarer_error::{
    ConfigError, FailureClass, PoolExhaustedError, ProviderError, WayfarerResult,
};
use wayfarer_interface::GenerationProvider;

/// Ordered, non-empty set of generation-API credentials.
///
/// Immutable once built, so one pool can be shared by any number of
/// concurrent requests without locking.
///
/// # Examples
///
/// ```
/// use wayfarer_core::Credential;
/// use wayfarer_fallback::CredentialPool;
///
/// let pool = CredentialPool::new(vec![Credential::new("key-1"), Credential::new("key-2")]).unwrap();
/// assert_eq!(pool.len(), 2);
///
/// assert!(CredentialPool::new(Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, Getters)]
pub struct CredentialPool {
    /// Credentials in attempt order
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Build a pool, dropping blank entries.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if no usable credential remains.
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Result<Self, ConfigError> {
        let credentials: Vec<Credential> = credentials
            .into_iter()
            .filter(|credential| !credential.is_blank())
            .collect();

        if credentials.is_empty() {
            return Err(ConfigError::new(
                "At least one generation API key must be configured",
            ));
        }

        debug!(count = credentials.len(), "Created credential pool");
        Ok(Self { credentials })
    }

    /// Number of credentials.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false; a pool cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Run one generation call, falling back across credentials.
    ///
    /// Returns the first successful response. Transient failures advance to
    /// the next credential; the first fatal failure is returned as-is.
    ///
    /// # Errors
    ///
    /// - The fatal [`ProviderError`], untouched, if any attempt fails fatally.
    /// - [`PoolExhaustedError`] if every credential failed transiently.
    #[instrument(
        skip(self, provider, prompt, config),
        fields(provider = provider.provider_name(), pool_size = self.credentials.len())
    )]
    pub async fn generate<P>(
        &self,
        provider: &P,
        prompt: &str,
        config: &GenerationConfig,
    ) -> WayfarerResult<String>
    where
        P: GenerationProvider + ?Sized,
    {
        let mut last_failure: Option<ProviderError> = None;

        for (index, credential) in self.credentials.iter().enumerate() {
            let credential_index = index + 1;
            debug!(credential_index, "Attempting generation");

            match provider.generate_content(prompt, credential, config).await {
                Ok(text) => {
                    if credential_index > 1 {
                        debug!(credential_index, "Generation succeeded after fallback");
                    }
                    return Ok(text);
                }
                Err(err) => match err.kind.class() {
                    FailureClass::Transient => {
                        warn!(
                            credential_index,
                            status = ?err.kind.status_code(),
                            error = %err.kind,
                            "Transient failure, trying next credential"
                        );
                        last_failure = Some(err);
                    }
                    FailureClass::Fatal => {
                        warn!(
                            credential_index,
                            status = ?err.kind.status_code(),
                            error = %err.kind,
                            "Fatal provider failure, not retrying"
                        );
                        return Err(err.into());
                    }
                },
            }
        }

        let last_failure = last_failure
            .map(|err| err.kind.to_string())
            .unwrap_or_default();
        error!(
            attempts = self.credentials.len(),
            last_failure = %last_failure,
            "All credentials failed"
        );
        Err(PoolExhaustedError::new(self.credentials.len(), last_failure).into())
    }
}
