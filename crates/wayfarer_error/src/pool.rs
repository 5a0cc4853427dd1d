//! Credential pool exhaustion.

/// Every credential in the pool failed with a transient error.
///
/// Distinct from a single provider failure: callers should treat this as a
/// "try again later" condition.
///
/// # Examples
///
/// ```
/// use wayfarer_error::PoolExhaustedError;
///
/// let err = PoolExhaustedError::new(3, "HTTP 429: quota exceeded");
/// assert!(format!("{}", err).contains("3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "All {} Gemini API keys failed. Please try again later. (last failure: {})",
    attempts,
    last_failure
)]
pub struct PoolExhaustedError {
    /// Number of credentials attempted
    pub attempts: usize,
    /// Message of the final transient failure
    pub last_failure: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PoolExhaustedError {
    /// Create a new PoolExhaustedError at the current location.
    #[track_caller]
    pub fn new(attempts: usize, last_failure: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            attempts,
            last_failure: last_failure.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
