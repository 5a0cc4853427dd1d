//! Fixed sampling configuration sent with every generation call.

use serde::Serialize;

/// Sampling configuration for the generation provider.
///
/// These are service-wide policy values, not per-request tunables. Field
/// names serialize to the provider's `generationConfig` keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling randomness in [0, 1]
    pub temperature: f32,
    /// Nucleus-sampling probability mass
    pub top_p: f32,
    /// Candidate pool size
    pub top_k: u32,
    /// Hard cap on response length
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Sampling temperature used for itineraries.
    pub const TEMPERATURE: f32 = 0.7;
    /// Nucleus sampling mass used for itineraries.
    pub const TOP_P: f32 = 0.9;
    /// Top-k used for itineraries.
    pub const TOP_K: u32 = 40;
    /// Output token cap used for itineraries.
    pub const MAX_OUTPUT_TOKENS: u32 = 8192;
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: Self::TEMPERATURE,
            top_p: Self::TOP_P,
            top_k: Self::TOP_K,
            max_output_tokens: Self::MAX_OUTPUT_TOKENS,
        }
    }
}
