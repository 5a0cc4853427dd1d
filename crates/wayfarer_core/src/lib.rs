//! Core data types for the Wayfarer itinerary generation service.
//!
//! This crate provides the request, result, and configuration types shared by
//! the planner, the provider clients, and the HTTP edge.

mod credential;
mod duration;
mod generation;
mod itinerary;
mod modification;
mod trip;

pub use credential::Credential;
pub use duration::{TripDuration, days_between, parse_calendar_date};
pub use generation::GenerationConfig;
pub use itinerary::{GenerationResult, Itinerary, TextResponse};
pub use modification::{
    ConversationTurn, GenerationMode, HISTORY_WINDOW, ModificationRequest, PlannerInput, Role,
};
pub use trip::{Budget, DateRange, PreferenceValue, TravelStyle, Travelers, TripRequest};
