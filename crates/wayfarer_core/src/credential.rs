//! Opaque API credentials.

use serde::Deserialize;

/// A single generation-API key.
///
/// The value is never printed: `Debug` is redacted and there is no `Display`.
/// Use [`Credential::expose`] only at the point the request is signed.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True if the key is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
