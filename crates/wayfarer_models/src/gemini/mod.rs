//! Gemini REST client.
//!
//! Talks to `models/{model}:generateContent` directly over HTTP so that status
//! codes reach the fallback classifier unchanged.

mod client;
mod dto;

pub use client::{DEFAULT_BASE_URL, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, Part, PromptFeedback,
};
