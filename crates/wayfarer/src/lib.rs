//! Wayfarer: itinerary generation over Gemini.
//!
//! Turns a structured trip request into a day-by-day itinerary, and applies
//! conversational edits to an existing one. Generation runs through an
//! ordered pool of API keys: transient failures (rate limits, overload, 5xx)
//! move on to the next key, anything else fails immediately.
//!
//! # Example
//!
//! ```no_run
//! use wayfarer::{Credential, CredentialPool, GeminiClient, Planner, PlannerInput, TripRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = CredentialPool::new(vec![Credential::new("key-1"), Credential::new("key-2")])?;
//! let planner = Planner::new(GeminiClient::new("gemini-2.5-pro"), pool);
//!
//! let trip: TripRequest = serde_json::from_str(
//!     r#"{"destination":"Kyoto","days":4,"interests":["temples","food"]}"#,
//! )?;
//! let result = planner.generate(PlannerInput::from(trip)).await?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

pub use wayfarer_core::{
    Budget, ConversationTurn, Credential, DateRange, GenerationConfig, GenerationMode,
    GenerationResult, Itinerary, ModificationRequest, PlannerInput, PreferenceValue, Role,
    TextResponse, TravelStyle, Travelers, TripRequest,
};
pub use wayfarer_error::{
    ConfigError, FailureClass, MalformedOutputError, PoolExhaustedError, ProviderError,
    ProviderErrorKind, RetryableError, ValidationError, ValidationErrorKind, WayfarerError,
    WayfarerErrorKind, WayfarerResult, classify_failure,
};
pub use wayfarer_fallback::CredentialPool;
pub use wayfarer_interface::GenerationProvider;
pub use wayfarer_models::GeminiClient;
pub use wayfarer_planner::{
    Extracted, Planner, REPHRASE_MESSAGE, build_initial_prompt, build_modification_prompt,
    extract, validate_trip,
};
pub use wayfarer_server::{AppConfig, create_router, serve};
