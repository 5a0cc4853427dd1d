//! Error types for the Wayfarer service.
//!
//! Every error carries the file and line where it was created, so a log line
//! points straight at the failing call site. The umbrella [`WayfarerError`]
//! wraps each concrete error through [`WayfarerErrorKind`].

mod config;
mod json;
mod output;
mod pool;
mod provider;
mod validation;

pub use config::ConfigError;
pub use json::JsonError;
pub use output::MalformedOutputError;
pub use pool::PoolExhaustedError;
pub use provider::{
    FailureClass, ProviderError, ProviderErrorKind, RetryableError, SERVER_ERROR_RANGE,
    TRANSIENT_KEYWORDS, TRANSIENT_STATUS_CODES, classify_failure,
};
pub use validation::{ValidationError, ValidationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum WayfarerErrorKind {
    /// Trip request failed validation
    Validation(ValidationError),
    /// Remote generation call failed
    Provider(ProviderError),
    /// Every credential failed transiently
    PoolExhausted(PoolExhaustedError),
    /// Model output could not be parsed
    MalformedOutput(MalformedOutputError),
    /// Configuration error
    Config(ConfigError),
    /// JSON serialization/deserialization error
    Json(JsonError),
}

impl std::fmt::Display for WayfarerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WayfarerErrorKind::Validation(e) => write!(f, "{}", e),
            WayfarerErrorKind::Provider(e) => write!(f, "{}", e),
            WayfarerErrorKind::PoolExhausted(e) => write!(f, "{}", e),
            WayfarerErrorKind::MalformedOutput(e) => write!(f, "{}", e),
            WayfarerErrorKind::Config(e) => write!(f, "{}", e),
            WayfarerErrorKind::Json(e) => write!(f, "{}", e),
        }
    }
}

/// Wayfarer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{ValidationError, ValidationErrorKind, WayfarerError, WayfarerErrorKind};
///
/// let err: WayfarerError = ValidationError::new(ValidationErrorKind::EmptyInterests).into();
/// assert!(matches!(err.kind(), WayfarerErrorKind::Validation(_)));
/// ```
#[derive(Debug)]
pub struct WayfarerError(Box<WayfarerErrorKind>);

impl WayfarerError {
    /// Create a new error from a kind.
    pub fn new(kind: WayfarerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WayfarerErrorKind {
        &self.0
    }

    /// Short message suitable for an API response body.
    ///
    /// Omits the source location, which only matters in logs.
    pub fn public_message(&self) -> String {
        match self.kind() {
            WayfarerErrorKind::Validation(e) => e.kind.to_string(),
            WayfarerErrorKind::Provider(e) => e.kind.to_string(),
            WayfarerErrorKind::PoolExhausted(e) => e.to_string(),
            WayfarerErrorKind::MalformedOutput(e) => e.reason.clone(),
            WayfarerErrorKind::Config(e) => e.message.clone(),
            WayfarerErrorKind::Json(e) => e.message.clone(),
        }
    }
}

impl std::fmt::Display for WayfarerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wayfarer Error: {}", self.0)
    }
}

impl std::error::Error for WayfarerError {}

// Generic From implementation for any type that converts to WayfarerErrorKind
impl<T> From<T> for WayfarerError
where
    T: Into<WayfarerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Wayfarer operations.
pub type WayfarerResult<T> = std::result::Result<T, WayfarerError>;
