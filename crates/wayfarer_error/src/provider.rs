//! Generation provider errors and the transient/fatal failure classifier.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Status codes outside the 5xx range that are worth retrying on another key.
pub const TRANSIENT_STATUS_CODES: &[u16] = &[429];

/// Every server-side status is treated as transient.
pub const SERVER_ERROR_RANGE: RangeInclusive<u16> = 500..=599;

/// Message vocabulary that marks a failure as transient, matched case-insensitively.
pub const TRANSIENT_KEYWORDS: &[&str] = &["overloaded", "unavailable", "quota", "timeout"];

static TRANSIENT_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    let alternation = TRANSIENT_KEYWORDS.join("|");
    regex::Regex::new(&format!("(?i)({})", alternation)).expect("keyword pattern is valid")
});

/// Outcome class of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureClass {
    /// Another credential may succeed
    #[display("transient")]
    Transient,
    /// Retrying will not help
    #[display("fatal")]
    Fatal,
}

/// Classify a remote-call failure from its status code and message.
///
/// Rate limiting (429), any 5xx, and messages mentioning overload,
/// unavailability, quota, or timeouts are transient. Everything else is fatal.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{FailureClass, classify_failure};
///
/// assert_eq!(classify_failure(Some(429), "Too Many Requests"), FailureClass::Transient);
/// assert_eq!(classify_failure(Some(503), ""), FailureClass::Transient);
/// assert_eq!(classify_failure(None, "The model is overloaded"), FailureClass::Transient);
/// assert_eq!(classify_failure(Some(400), "Invalid argument"), FailureClass::Fatal);
/// ```
pub fn classify_failure(status: Option<u16>, message: &str) -> FailureClass {
    let transient_status = status
        .is_some_and(|code| TRANSIENT_STATUS_CODES.contains(&code) || SERVER_ERROR_RANGE.contains(&code));

    if transient_status || TRANSIENT_PATTERN.is_match(message) {
        FailureClass::Transient
    } else {
        FailureClass::Fatal
    }
}

/// Gemini provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message from the response body
        message: String,
    },
    /// Request never produced a response
    #[display("Network error: {}", _0)]
    Network(String),
    /// Response carried no candidate text
    #[display("Empty response: {}", _0)]
    EmptyResponse(String),
    /// Response body could not be decoded
    #[display("Invalid response: {}", _0)]
    InvalidResponse(String),
}

impl ProviderErrorKind {
    /// HTTP status code, when the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Human-readable failure message used for classification.
    pub fn message(&self) -> &str {
        match self {
            ProviderErrorKind::Http { message, .. } => message,
            ProviderErrorKind::Network(msg)
            | ProviderErrorKind::EmptyResponse(msg)
            | ProviderErrorKind::InvalidResponse(msg) => msg,
        }
    }

    /// Classify this failure as transient or fatal.
    pub fn class(&self) -> FailureClass {
        classify_failure(self.status_code(), self.message())
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::Http {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable) or 429 (rate limit) return
/// true. Permanent errors like 401 (unauthorized) or 400 (bad request) return
/// false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.class() == FailureClass::Transient
    }
}
