//! Generation provider integrations for Wayfarer.
//!
//! Currently a single backend: Google's Gemini `generateContent` REST API.

mod gemini;

pub use gemini::{
    Candidate, Content, DEFAULT_BASE_URL, GeminiClient, GenerateContentRequest,
    GenerateContentRequestBuilder, GenerateContentResponse, Part, PromptFeedback,
};
