//! Errors for model output that cannot be turned into structured data.

/// Longest excerpt of offending model output kept in the display form.
const EXCERPT_LIMIT: usize = 200;

/// The model responded, but not with a parseable JSON object.
///
/// The full offending text is kept in `raw` for diagnostics; the display form
/// only shows a short excerpt.
#[derive(Debug, Clone)]
pub struct MalformedOutputError {
    /// Why extraction failed
    pub reason: String,
    /// Text that was handed to the parser
    pub raw: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl MalformedOutputError {
    /// Create a new MalformedOutputError at the current location.
    #[track_caller]
    pub fn new(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            reason: reason.into(),
            raw: raw.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// First characters of the offending text.
    pub fn excerpt(&self) -> &str {
        match self.raw.char_indices().nth(EXCERPT_LIMIT) {
            Some((idx, _)) => &self.raw[..idx],
            None => &self.raw,
        }
    }
}

impl std::fmt::Display for MalformedOutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Malformed Output Error: {} (output: {:?}) at line {} in {}",
            self.reason,
            self.excerpt(),
            self.line,
            self.file
        )
    }
}

impl std::error::Error for MalformedOutputError {}
