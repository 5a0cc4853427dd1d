//! Generation results: itineraries and plain-text answers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the completion timestamp.
const GENERATED_AT: &str = "generatedAt";
/// Field holding the backend identifier.
const MODEL: &str = "model";
/// Field marking a modification result.
const IS_MODIFIED: &str = "isModified";
/// Field echoing the sanitized trip request.
const INPUT: &str = "input";
/// Field marking a plain-text answer.
const TEXT_MARKER: &str = "isTextResponse";
const MESSAGE: &str = "message";

/// Write `generatedAt` and `model`, replacing whatever was there.
fn stamp(fields: &mut Map<String, Value>, model: &str, at: DateTime<Utc>) {
    fields.insert(
        GENERATED_AT.to_string(),
        Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    fields.insert(MODEL.to_string(), Value::String(model.to_string()));
}

/// Structured itinerary produced by the model.
///
/// Treated as an opaque JSON object: only its object-ness is validated.
/// Metadata added by the planner lives alongside the model's own fields.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use wayfarer_core::Itinerary;
///
/// let mut fields = serde_json::Map::new();
/// fields.insert("destination".into(), "Paris".into());
///
/// let mut itinerary = Itinerary::from_fields(fields);
/// itinerary.annotate("gemini-2.5-pro", Utc::now());
/// assert_eq!(itinerary.model(), Some("gemini-2.5-pro"));
/// assert!(itinerary.generated_at().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(Map<String, Value>);

impl Itinerary {
    /// Wrap the fields of a parsed model response.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// All fields, model-produced and metadata.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Look up one field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Trip overview written by the model.
    pub fn summary(&self) -> Option<&str> {
        self.get("summary").and_then(Value::as_str)
    }

    /// Destination written by the model.
    pub fn destination(&self) -> Option<&str> {
        self.get("destination").and_then(Value::as_str)
    }

    /// Number of day entries in the day-by-day table.
    pub fn day_count(&self) -> usize {
        self.get("itineraryTable")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Completion timestamp, if annotated.
    pub fn generated_at(&self) -> Option<&str> {
        self.get(GENERATED_AT).and_then(Value::as_str)
    }

    /// Backend identifier, if annotated.
    pub fn model(&self) -> Option<&str> {
        self.get(MODEL).and_then(Value::as_str)
    }

    /// True if this itinerary came out of modification mode.
    pub fn is_modified(&self) -> bool {
        self.get(IS_MODIFIED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Stamp completion time and backend, overwriting anything the model wrote
    /// under those keys.
    pub fn annotate(&mut self, model: &str, at: DateTime<Utc>) {
        stamp(&mut self.0, model, at);
    }

    /// Mark this itinerary as the product of a modification.
    pub fn mark_modified(&mut self) {
        self.0.insert(IS_MODIFIED.to_string(), Value::Bool(true));
    }

    /// Attach the request that produced this itinerary.
    pub fn attach_input(&mut self, input: Value) {
        self.0.insert(INPUT.to_string(), input);
    }
}

/// Plain-text answer returned when the user asked a question instead of
/// requesting an edit.
///
/// Any other fields the model sent alongside the answer are kept in `extra`,
/// which is also where metadata goes.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TextResponse;
///
/// let fields = serde_json::json!({"isTextResponse": 1, "note": "kept"});
/// let text = TextResponse::from_fields(fields.as_object().unwrap().clone());
/// assert!(text.is_text_response);
/// assert_eq!(text.message, "");
/// assert_eq!(text.extra["note"], "kept");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResponse {
    /// Always true; distinguishes this shape from an itinerary
    pub is_text_response: bool,
    /// The answer
    #[serde(default)]
    pub message: String,
    /// Remaining fields, including metadata once annotated
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextResponse {
    /// Creates a text response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            is_text_response: true,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Build from a parsed object already known to be a text answer.
    ///
    /// A missing or null `message` becomes empty; a non-string one is kept as
    /// its JSON text.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        fields.remove(TEXT_MARKER);
        let message = match fields.remove(MESSAGE) {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Self {
            is_text_response: true,
            message,
            extra: fields,
        }
    }

    /// Completion timestamp, if annotated.
    pub fn generated_at(&self) -> Option<&str> {
        self.extra.get(GENERATED_AT).and_then(Value::as_str)
    }

    /// Backend identifier, if annotated.
    pub fn model(&self) -> Option<&str> {
        self.extra.get(MODEL).and_then(Value::as_str)
    }

    /// Stamp completion time and backend.
    pub fn annotate(&mut self, model: &str, at: DateTime<Utc>) {
        stamp(&mut self.extra, model, at);
    }

    /// Attach the request that produced this answer.
    pub fn attach_input(&mut self, input: Value) {
        self.extra.insert(INPUT.to_string(), input);
    }
}

/// What a generation call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Text(TextResponse),
    Itinerary(Itinerary),
}

impl GenerationResult {
    /// True for the plain-text shape.
    pub fn is_text_response(&self) -> bool {
        matches!(self, GenerationResult::Text(_))
    }

    /// The itinerary, if this is one.
    pub fn as_itinerary(&self) -> Option<&Itinerary> {
        match self {
            GenerationResult::Itinerary(itinerary) => Some(itinerary),
            GenerationResult::Text(_) => None,
        }
    }

    /// The text answer, if this is one.
    pub fn as_text(&self) -> Option<&TextResponse> {
        match self {
            GenerationResult::Text(text) => Some(text),
            GenerationResult::Itinerary(_) => None,
        }
    }
}

impl From<Itinerary> for GenerationResult {
    fn from(itinerary: Itinerary) -> Self {
        GenerationResult::Itinerary(itinerary)
    }
}

impl From<TextResponse> for GenerationResult {
    fn from(text: TextResponse) -> Self {
        GenerationResult::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn annotate_overwrites_model_written_metadata() {
        let Value::Object(fields) = json!({"model": "made-up", "summary": "s"}) else {
            unreachable!()
        };
        let mut itinerary = Itinerary::from_fields(fields);
        itinerary.annotate("gemini-2.5-pro", Utc::now());
        assert_eq!(itinerary.model(), Some("gemini-2.5-pro"));
        assert_eq!(itinerary.summary(), Some("s"));
    }

    #[test]
    fn text_response_serializes_camel_case() {
        let result = GenerationResult::from(TextResponse::new("Day 2 is busiest."));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({"isTextResponse": true, "message": "Day 2 is busiest."}));
    }

    #[test]
    fn text_response_keeps_extra_fields_and_metadata() {
        let Value::Object(fields) =
            json!({"isTextResponse": true, "message": "No.", "reason": "closed"})
        else {
            unreachable!()
        };
        let mut text = TextResponse::from_fields(fields);
        text.annotate("gemini-2.5-pro", Utc::now());

        let json = serde_json::to_value(GenerationResult::from(text)).unwrap();
        assert_eq!(json["message"], "No.");
        assert_eq!(json["reason"], "closed");
        assert_eq!(json["model"], "gemini-2.5-pro");
        assert!(json["generatedAt"].as_str().is_some_and(|at| !at.is_empty()));
    }

    #[test]
    fn non_string_message_is_kept_as_json_text() {
        let Value::Object(fields) = json!({"isTextResponse": true, "message": ["a", "b"]}) else {
            unreachable!()
        };
        assert_eq!(TextResponse::from_fields(fields).message, r#"["a","b"]"#);
    }

    #[test]
    fn itinerary_serializes_flat() {
        let Value::Object(fields) = json!({"destination": "Oslo"}) else {
            unreachable!()
        };
        let mut itinerary = Itinerary::from_fields(fields);
        itinerary.mark_modified();
        let json = serde_json::to_value(GenerationResult::from(itinerary)).unwrap();
        assert_eq!(json["destination"], "Oslo");
        assert_eq!(json["isModified"], true);
    }
}
