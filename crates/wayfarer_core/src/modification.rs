//! Modification requests and the wire-level planner input.

use crate::TripRequest;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of most recent conversation turns that reach the prompt.
pub const HISTORY_WINDOW: usize = 10;

/// Roles are the same for every conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[serde(alias = "ai", alias = "bot", alias = "model")]
    Assistant,
}

/// One prior exchange in the planning conversation.
///
/// Turns in the recognised `{role, message}` shape are typed; anything else
/// the client sends is kept verbatim and re-serialized into the prompt as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConversationTurn {
    /// A turn with a known role and text
    Message {
        /// Who said it
        #[serde(alias = "sender")]
        role: Role,
        /// What was said
        #[serde(alias = "content", alias = "text")]
        message: String,
    },
    /// Any other shape, passed through untouched
    Raw(Value),
}

impl ConversationTurn {
    /// Creates a new turn.
    pub fn new(role: Role, message: impl Into<String>) -> Self {
        Self::Message {
            role,
            message: message.into(),
        }
    }

    /// Speaker, if the turn has a recognised shape.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Message { role, .. } => Some(*role),
            Self::Raw(_) => None,
        }
    }

    /// Text, if the turn has a recognised shape.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message { message, .. } => Some(message),
            Self::Raw(_) => None,
        }
    }
}

/// Request to edit a previously generated itinerary.
///
/// The current itinerary and the trip context are opaque: they are never
/// reparsed, only re-serialized into the prompt.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ModificationRequest {
    /// Original trip details
    context: Value,
    /// Itinerary produced by an earlier call
    current_itinerary: Value,
    /// Prior turns, oldest first
    conversation_history: Vec<ConversationTurn>,
    /// The new user utterance
    user_said: String,
}

impl ModificationRequest {
    /// Creates a new modification request.
    pub fn new(
        context: Value,
        current_itinerary: Value,
        conversation_history: Vec<ConversationTurn>,
        user_said: impl Into<String>,
    ) -> Self {
        Self {
            context,
            current_itinerary,
            conversation_history,
            user_said: user_said.into(),
        }
    }

    /// The last [`HISTORY_WINDOW`] turns, oldest first.
    pub fn recent_history(&self) -> &[ConversationTurn] {
        let skip = self.conversation_history.len().saturating_sub(HISTORY_WINDOW);
        &self.conversation_history[skip..]
    }
}

/// The two entry modes of the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Build a fresh itinerary
    Initial(TripRequest),
    /// Edit an existing itinerary, or answer a question about it
    Modification(ModificationRequest),
}

/// Planner input exactly as it arrives from the HTTP edge.
///
/// Trip fields sit at the top level; modification fields are optional
/// siblings.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{GenerationMode, PlannerInput};
///
/// let input: PlannerInput = serde_json::from_str(r#"{
///     "destination": "Paris",
///     "currentItinerary": {"summary": "Three days in Paris"},
///     "userSaid": "Add a museum on day 2"
/// }"#).unwrap();
/// assert!(matches!(input.into_mode(), GenerationMode::Modification(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerInput {
    #[serde(flatten)]
    pub trip: TripRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_modification_request: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_itinerary: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_said: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl From<TripRequest> for PlannerInput {
    fn from(trip: TripRequest) -> Self {
        Self {
            trip,
            ..Default::default()
        }
    }
}

impl PlannerInput {
    /// Decide which mode this input selects.
    ///
    /// Modification mode needs a non-empty current itinerary and is skipped
    /// only when `isModificationRequest` is explicitly `false`. Without an
    /// explicit `context`, the top-level trip fields serve as the context.
    #[tracing::instrument(skip(self))]
    pub fn into_mode(self) -> GenerationMode {
        let wants_modification = self.is_modification_request != Some(false);
        match self.current_itinerary {
            Some(itinerary) if wants_modification && !is_empty_value(&itinerary) => {
                let context = self
                    .context
                    .unwrap_or_else(|| serde_json::to_value(&self.trip).unwrap_or_default());
                tracing::debug!(
                    history_len = self.conversation_history.len(),
                    "Selected modification mode"
                );
                GenerationMode::Modification(ModificationRequest::new(
                    context,
                    itinerary,
                    self.conversation_history,
                    self.user_said.unwrap_or_default(),
                ))
            }
            _ => {
                tracing::debug!("Selected initial generation mode");
                GenerationMode::Initial(self.trip)
            }
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.trim().is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn turns(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| ConversationTurn::new(Role::User, format!("turn {}", i)))
            .collect()
    }

    #[test]
    fn recent_history_keeps_last_ten() {
        let request = ModificationRequest::new(json!({}), json!({"a": 1}), turns(14), "hi");
        let recent = request.recent_history();
        assert_eq!(recent.len(), HISTORY_WINDOW);
        assert_eq!(recent[0].message(), Some("turn 4"));
        assert_eq!(recent[9].message(), Some("turn 13"));
    }

    #[test]
    fn short_history_is_kept_whole() {
        let request = ModificationRequest::new(json!({}), json!({"a": 1}), turns(3), "hi");
        assert_eq!(request.recent_history().len(), 3);
    }

    #[test]
    fn empty_itinerary_falls_back_to_initial_mode() {
        for empty in [json!(null), json!({}), json!([]), json!("  ")] {
            let input = PlannerInput {
                current_itinerary: Some(empty),
                user_said: Some("make it cheaper".into()),
                ..Default::default()
            };
            assert!(matches!(input.into_mode(), GenerationMode::Initial(_)));
        }
    }

    #[test]
    fn explicit_false_flag_forces_initial_mode() {
        let input = PlannerInput {
            is_modification_request: Some(false),
            current_itinerary: Some(json!({"summary": "x"})),
            ..Default::default()
        };
        assert!(matches!(input.into_mode(), GenerationMode::Initial(_)));
    }

    #[test]
    fn trip_fields_become_context_when_none_given() {
        let input: PlannerInput = serde_json::from_value(json!({
            "destination": "Goa",
            "currentItinerary": {"summary": "Beach week"},
            "userSaid": "Add a spice farm visit",
            "conversationHistory": [
                {"role": "user", "message": "Plan Goa"},
                {"role": "ai", "content": "Here you go"}
            ]
        }))
        .unwrap();

        let GenerationMode::Modification(request) = input.into_mode() else {
            panic!("expected modification mode");
        };
        assert_eq!(request.context()["destination"], "Goa");
        assert_eq!(request.user_said(), "Add a spice farm visit");
        assert_eq!(request.conversation_history()[1].role(), Some(Role::Assistant));
    }

    #[test]
    fn unrecognised_turn_shapes_are_kept_verbatim() {
        let input: PlannerInput = serde_json::from_value(json!({
            "destination": "Paris",
            "currentItinerary": {"summary": "Three days in Paris"},
            "userSaid": "Make day 2 lighter",
            "conversationHistory": [
                {"type": "user", "text": "Plan Paris", "timestamp": 1},
                "just a string",
                {"role": "user", "message": "Add Orsay"}
            ]
        }))
        .unwrap();

        let GenerationMode::Modification(request) = input.into_mode() else {
            panic!("expected modification mode");
        };
        let history = request.conversation_history();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history[0],
            ConversationTurn::Raw(json!({"type": "user", "text": "Plan Paris", "timestamp": 1}))
        );
        assert_eq!(history[1], ConversationTurn::Raw(json!("just a string")));
        assert_eq!(history[2].message(), Some("Add Orsay"));
        assert_eq!(
            serde_json::to_value(&history[0]).unwrap(),
            json!({"type": "user", "text": "Plan Paris", "timestamp": 1})
        );
    }

    #[test]
    fn window_counts_unrecognised_turns() {
        let mut history = turns(9);
        history.extend((0..3).map(|i| ConversationTurn::Raw(json!({"seq": i}))));
        let request = ModificationRequest::new(json!({}), json!({"a": 1}), history, "hi");
        let recent = request.recent_history();
        assert_eq!(recent.len(), HISTORY_WINDOW);
        assert_eq!(recent[0].message(), Some("turn 2"));
        assert_eq!(recent[9], ConversationTurn::Raw(json!({"seq": 2})));
    }
}
