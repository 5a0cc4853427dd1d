//! Trip request validation errors.

/// Specific validation failures for a trip request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// A required field is absent or empty
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// Day count falls outside the accepted range
    #[display("Days must be between {} and {}, got {}", min, max, days)]
    DaysOutOfRange {
        /// Requested or derived day count
        days: u32,
        /// Smallest accepted value
        min: u32,
        /// Largest accepted value
        max: u32,
    },
    /// Travel style is not one of the supported tiers
    #[display("Travel style must be budget, moderate, or luxury, got '{}'", _0)]
    InvalidTravelStyle(String),
    /// No interests or travel vibe tags were supplied
    #[display("Interests must be a non-empty array")]
    EmptyInterests,
    /// A date field is not in YYYY-MM-DD form
    #[display("{} must be in YYYY-MM-DD format, got '{}'", field, value)]
    InvalidDate {
        /// Field name as it appears on the wire
        field: String,
        /// Offending value
        value: String,
    },
    /// Traveler count is below one
    #[display("Number of travelers must be at least 1")]
    NoTravelers,
    /// Modification request without a user utterance
    #[display("Modification requests require a non-empty userSaid")]
    MissingUtterance,
}

/// Validation error with source location.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingField("destination".into()));
/// assert!(format!("{}", err).contains("destination"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific validation failure
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
