//! Recover a JSON object from free-form model output.
//!
//! Extraction runs in two stages:
//!
//! 1. **Strip noise**: code-fence markers (with or without a language tag,
//!    any case), control characters, surrounding whitespace.
//! 2. **Locate the object**: scan for the outermost balanced `{ ... }` span,
//!    tracking string literals and escapes so braces inside string values
//!    never end the span early. The first span that parses as a JSON object
//!    wins.
//!
//! No repair is attempted beyond slicing. Anything else is a
//! [`MalformedOutputError`] carrying the cleaned text.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, instrument};
use wayfarer_core::{Itinerary, TextResponse};
use wayfarer_error::MalformedOutputError;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```[a-z0-9_+-]*[ \t]*").expect("code fence pattern is valid")
});

/// Field that marks a plain-text answer instead of an itinerary.
const TEXT_MARKER: &str = "isTextResponse";

/// A structured value recovered from model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Any JSON object not flagged as a text answer
    Itinerary(Itinerary),
    /// An object whose `isTextResponse` is truthy, kept with all its fields
    Text(TextResponse),
}

/// Extract a single JSON object from raw model output.
///
/// # Examples
///
/// ```
/// use wayfarer_planner::{Extracted, extract};
///
/// let raw = "Sure! ```json\n{\"destination\":\"Paris\"}\n```\nEnjoy!";
/// match extract(raw).unwrap() {
///     Extracted::Itinerary(itinerary) => assert_eq!(itinerary.destination(), Some("Paris")),
///     Extracted::Text(_) => unreachable!(),
/// }
///
/// assert!(extract("I cannot help with that.").is_err());
/// ```
#[instrument(skip_all, fields(raw_len = raw.len()))]
pub fn extract(raw: &str) -> Result<Extracted, MalformedOutputError> {
    let cleaned = strip_noise(raw);
    let fields = find_object(&cleaned)?;

    if fields.get(TEXT_MARKER).is_some_and(is_truthy) {
        debug!(field_count = fields.len(), "Extracted text response");
        return Ok(Extracted::Text(TextResponse::from_fields(fields)));
    }

    debug!(field_count = fields.len(), "Extracted itinerary object");
    Ok(Extracted::Itinerary(Itinerary::from_fields(fields)))
}

/// Loose truthiness: anything but `false`, `null`, zero or the empty string.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Remove fences and control characters, then trim.
fn strip_noise(raw: &str) -> String {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let visible: String = unfenced.chars().filter(|c| !c.is_control()).collect();
    visible.trim().to_string()
}

/// Parse the first balanced span that is a JSON object.
fn find_object(text: &str) -> Result<Map<String, Value>, MalformedOutputError> {
    let mut from = 0;
    let mut last_failure = None;

    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        let Some(end) = matching_brace(text, start) else {
            // Unterminated: every later brace is nested inside this span.
            return Err(MalformedOutputError::new(
                last_failure.unwrap_or_else(|| "unterminated JSON object".to_string()),
                text,
            ));
        };

        match serde_json::from_str::<Value>(&text[start..=end]) {
            Ok(Value::Object(fields)) => return Ok(fields),
            Ok(other) => {
                last_failure = Some(format!("expected a JSON object, got {}", other));
                from = end + 1;
            }
            Err(e) => {
                debug!(start, end, error = %e, "Skipping unparseable candidate span");
                last_failure = Some(format!("invalid JSON: {}", e));
                from = end + 1;
            }
        }
    }

    Err(MalformedOutputError::new(
        last_failure.unwrap_or_else(|| "no JSON object found in model output".to_string()),
        text,
    ))
}

/// Byte index of the `}` closing the `{` at `start`, if any.
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, byte) in text.bytes().enumerate().skip(start) {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn itinerary(raw: &str) -> Itinerary {
        match extract(raw).expect("extraction should succeed") {
            Extracted::Itinerary(itinerary) => itinerary,
            Extracted::Text(text) => panic!("expected itinerary, got {:?}", text),
        }
    }

    #[test]
    fn strips_fences_and_surrounding_prose() {
        let raw = "Sure! ```json\n{\"destination\":\"Paris\"}\n```\nEnjoy!";
        let result = itinerary(raw);
        assert_eq!(Value::Object(result.fields().clone()), json!({"destination": "Paris"}));
    }

    #[test]
    fn fence_tags_are_case_insensitive() {
        let raw = "```JSON\n{\"days\": 3}\n```";
        assert_eq!(itinerary(raw).get("days"), Some(&json!(3)));
    }

    #[test]
    fn bare_fences_are_removed() {
        let raw = "```\n{\"summary\": \"Short hop\"}\n```";
        assert_eq!(itinerary(raw).summary(), Some("Short hop"));
    }

    #[test]
    fn control_characters_are_dropped() {
        let raw = "\u{0007}{\"destination\":\u{0000} \"Rome\"}\u{001b}";
        assert_eq!(itinerary(raw).destination(), Some("Rome"));
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_span() {
        let raw = r#"Plan: {"note": "use } and { freely", "nested": {"quote": "\"}\""}} done"#;
        let result = itinerary(raw);
        assert_eq!(result.get("note"), Some(&json!("use } and { freely")));
        assert_eq!(result.get("nested"), Some(&json!({"quote": "\"}\""})));
    }

    #[test]
    fn nested_objects_stay_intact() {
        let raw = r#"{"itineraryTable":[{"day":1,"meals":{"lunch":"Dhaba"}}]} trailing {"x":1}"#;
        assert_eq!(itinerary(raw).day_count(), 1);
    }

    #[test]
    fn unparseable_brace_prose_is_skipped() {
        let raw = r#"Here is {your} plan: {"destination":"Paris"}"#;
        assert_eq!(itinerary(raw).destination(), Some("Paris"));
    }

    #[test]
    fn text_without_braces_is_malformed() {
        let err = extract("I cannot help with that.").unwrap_err();
        assert_eq!(err.raw, "I cannot help with that.");
    }

    #[test]
    fn truncated_output_is_malformed() {
        let raw = r#"{"summary":"Long trip","itineraryTable":[{"day":1},{"day":2"#;
        assert!(extract(raw).is_err());
    }

    #[test]
    fn empty_object_is_an_empty_itinerary() {
        assert!(itinerary("{}").fields().is_empty());
    }

    #[test]
    fn text_response_is_recognized() {
        let raw = r#"{"isTextResponse": true, "message": "Day 2 is in Old Goa."}"#;
        assert_eq!(
            extract(raw).unwrap(),
            Extracted::Text(TextResponse::new("Day 2 is in Old Goa."))
        );
    }

    #[test]
    fn text_response_without_message_has_empty_message() {
        let Extracted::Text(text) = extract(r#"{"isTextResponse": true}"#).unwrap() else {
            panic!("expected a text response");
        };
        assert_eq!(text.message, "");
        assert!(text.extra.is_empty());
    }

    #[test]
    fn truthy_text_markers_are_recognized() {
        for marker in [r#"1"#, r#""yes""#, r#""false""#, r#"[]"#] {
            let raw = format!(r#"{{"isTextResponse": {}, "message": "ok"}}"#, marker);
            assert!(
                matches!(extract(&raw).unwrap(), Extracted::Text(_)),
                "marker {}",
                marker
            );
        }
        for marker in [r#"0"#, r#""""#, r#"null"#] {
            let raw = format!(r#"{{"isTextResponse": {}, "summary": "x"}}"#, marker);
            assert!(
                matches!(extract(&raw).unwrap(), Extracted::Itinerary(_)),
                "marker {}",
                marker
            );
        }
    }

    #[test]
    fn text_response_keeps_other_fields() {
        let raw = r#"{"isTextResponse": true, "message": "Closed Mondays.", "suggestions": ["Orsay"]}"#;
        let Extracted::Text(text) = extract(raw).unwrap() else {
            panic!("expected a text response");
        };
        assert_eq!(text.message, "Closed Mondays.");
        assert_eq!(text.extra["suggestions"], serde_json::json!(["Orsay"]));
    }

    #[test]
    fn false_text_marker_stays_an_itinerary() {
        let result = itinerary(r#"{"isTextResponse": false, "summary": "x"}"#);
        assert_eq!(result.summary(), Some("x"));
    }
}
