//! Itinerary planning engine.
//!
//! Turns a trip request (or an edit request against an existing itinerary)
//! into a prompt, runs it through the credential pool, and recovers a
//! structured result from the model's free-text answer.

pub mod extraction;
pub mod prompt;
mod planner;
mod validation;

pub use extraction::{Extracted, extract};
pub use planner::{Planner, REPHRASE_MESSAGE};
pub use prompt::{build_initial_prompt, build_modification_prompt};
pub use validation::{MAX_DAYS, MIN_DAYS, validate_modification, validate_trip};
