//! Generation orchestration.

use crate::{
    Extracted, build_initial_prompt, build_modification_prompt, extract, validate_modification,
    validate_trip,
};
use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use wayfarer_core::{
    GenerationConfig, GenerationMode, GenerationResult, ModificationRequest, PlannerInput,
    TextResponse, TripRequest,
};
use wayfarer_error::{JsonError, WayfarerResult};
use wayfarer_fallback::CredentialPool;
use wayfarer_interface::GenerationProvider;

/// Canned reply when a modification response cannot be parsed.
pub const REPHRASE_MESSAGE: &str = "I understood your request but had trouble generating the \
     updated itinerary. Could you please rephrase your modification?";

/// Drives one itinerary generation end to end.
///
/// Holds only immutable configuration: the provider, the credential pool, and
/// the sampling policy. Share it behind an `Arc` across concurrent requests.
#[derive(Debug, Clone)]
pub struct Planner<P> {
    provider: P,
    pool: CredentialPool,
    config: GenerationConfig,
}

impl<P: GenerationProvider> Planner<P> {
    /// Creates a planner with the default generation policy.
    pub fn new(provider: P, pool: CredentialPool) -> Self {
        Self {
            provider,
            pool,
            config: GenerationConfig::default(),
        }
    }

    /// The backing provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The credential pool.
    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    /// Generate an itinerary or answer, picking the mode from the input.
    ///
    /// # Errors
    ///
    /// - Validation errors, before any remote call.
    /// - A fatal provider error or pool exhaustion from the remote call.
    /// - Malformed output, in initial mode only.
    #[instrument(skip_all, fields(model = self.provider.model_name()))]
    pub async fn generate(&self, input: PlannerInput) -> WayfarerResult<GenerationResult> {
        match input.into_mode() {
            GenerationMode::Initial(trip) => self.generate_initial(&trip).await,
            GenerationMode::Modification(request) => self.modify(&request).await,
        }
    }

    /// Build a fresh itinerary from a trip request.
    #[instrument(skip_all, fields(destination = trip.destination.as_deref()))]
    pub async fn generate_initial(&self, trip: &TripRequest) -> WayfarerResult<GenerationResult> {
        let days = validate_trip(trip)?;
        debug!(days, "Trip request validated");

        let prompt = build_initial_prompt(trip);
        let raw = self.pool.generate(&self.provider, &prompt, &self.config).await?;

        let extracted = extract(&raw).inspect_err(|e| {
            error!(reason = %e.reason, output = e.excerpt(), "Malformed model output");
        })?;

        let model = self.provider.model_name();
        let now = Utc::now();
        let echo = serde_json::to_value(trip.sanitized())
            .map_err(|e| JsonError::new(format!("Failed to echo trip input: {}", e)))?;

        match extracted {
            Extracted::Itinerary(mut itinerary) => {
                itinerary.annotate(model, now);
                itinerary.attach_input(echo);
                info!(days = itinerary.day_count(), "Generated itinerary");
                Ok(itinerary.into())
            }
            Extracted::Text(mut text) => {
                text.annotate(model, now);
                text.attach_input(echo);
                info!("Model answered with text");
                Ok(text.into())
            }
        }
    }

    /// Apply a conversational edit to an existing itinerary.
    ///
    /// Unparseable model output degrades to a [`TextResponse`] asking the user
    /// to rephrase; every other failure propagates.
    #[instrument(skip_all, fields(history_len = request.conversation_history().len()))]
    pub async fn modify(&self, request: &ModificationRequest) -> WayfarerResult<GenerationResult> {
        validate_modification(request)?;

        let prompt = build_modification_prompt(request);
        let raw = self.pool.generate(&self.provider, &prompt, &self.config).await?;

        match extract(&raw) {
            Ok(Extracted::Itinerary(mut itinerary)) => {
                itinerary.annotate(self.provider.model_name(), Utc::now());
                itinerary.mark_modified();
                info!("Modified itinerary");
                Ok(itinerary.into())
            }
            Ok(Extracted::Text(text)) => {
                info!("Answered modification request with text");
                Ok(text.into())
            }
            Err(e) => {
                warn!(
                    reason = %e.reason,
                    output = e.excerpt(),
                    "Unparseable modification output, asking user to rephrase"
                );
                Ok(TextResponse::new(REPHRASE_MESSAGE).into())
            }
        }
    }
}
