//! Application configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`wayfarer.toml` in the working directory, or an explicit path)
//! 3. `WAYFARER_*` environment variables, nested with `__`
//!    (e.g. `WAYFARER_SERVER__PORT=9000`)
//!
//! Gemini keys are additionally picked up from `GEMINI_API_KEY1`,
//! `GEMINI_API_KEY2`, ... and a bare `GEMINI_API_KEY`, appended after any
//! configured keys. The misspelled `GEMENI_API_KEY*` family is still read
//! after the correct one, for deployments that set it.

use derive_getters::Getters;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};
use wayfarer_core::Credential;
use wayfarer_error::ConfigError;
use wayfarer_fallback::CredentialPool;
use wayfarer_models::{DEFAULT_BASE_URL, GeminiClient};
use wayfarer_planner::Planner;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default Gemini model, reported as `model` in result metadata.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Prefix for numbered key variables (`GEMINI_API_KEY1`, ...).
const NUMBERED_KEY_PREFIX: &str = "GEMINI_API_KEY";
/// Older misspelled prefix still found in deployed environments.
const LEGACY_KEY_PREFIX: &str = "GEMENI_API_KEY";
/// Config file looked up when no explicit path is given.
const DEFAULT_CONFIG_NAME: &str = "wayfarer";
const ENV_PREFIX: &str = "WAYFARER";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct AppConfig {
    /// HTTP listener settings
    server: ServerSettings,
    /// Gemini backend settings
    gemini: GeminiSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ServerSettings {
    host: String,
    port: u16,
}

/// Gemini backend settings.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct GeminiSettings {
    /// Model identifier
    model: String,
    /// API host, without a trailing slash
    base_url: String,
    /// Keys in attempt order
    #[serde(default)]
    api_keys: Vec<Credential>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and the environment.
    ///
    /// With `path`, that file must exist. Without it, `wayfarer.toml` is read
    /// if present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a source cannot be read or the merged
    /// result does not deserialize.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)
            .and_then(|b| b.set_default("server.port", i64::from(DEFAULT_PORT)))
            .and_then(|b| b.set_default("gemini.model", DEFAULT_MODEL))
            .and_then(|b| b.set_default("gemini.base_url", DEFAULT_BASE_URL))
            .map_err(|e| ConfigError::new(format!("Invalid default configuration: {}", e)))?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("gemini.api_keys"),
            )
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        let mut config: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.merge_api_keys(env_api_keys(|name| std::env::var(name).ok()));
        debug!(
            model = %config.gemini.model,
            key_count = config.gemini.api_keys.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Append keys after the configured ones, skipping blanks and duplicates.
    pub fn merge_api_keys(&mut self, extra: impl IntoIterator<Item = String>) {
        let keys = &mut self.gemini.api_keys;
        let candidates: Vec<Credential> = std::mem::take(keys)
            .into_iter()
            .chain(extra.into_iter().map(Credential::new))
            .collect();

        for candidate in candidates {
            let duplicate = keys.iter().any(|key| key.expose() == candidate.expose());
            if !candidate.is_blank() && !duplicate {
                keys.push(candidate);
            }
        }
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Override the listener settings, e.g. from command-line flags.
    pub fn override_listener(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Credential pool over the configured keys.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if no usable key is configured.
    pub fn credential_pool(&self) -> Result<CredentialPool, ConfigError> {
        CredentialPool::new(self.gemini.api_keys.iter().cloned())
    }

    /// Planner backed by the configured Gemini model and keys.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if no usable key is configured.
    pub fn planner(&self) -> Result<Planner<GeminiClient>, ConfigError> {
        let client = GeminiClient::with_base_url(&self.gemini.model, &self.gemini.base_url);
        Ok(Planner::new(client, self.credential_pool()?))
    }
}

/// Collect Gemini keys from numbered variables, then the bare variable.
///
/// Numbered variables are read from 1 upward and stop at the first gap. The
/// `GEMINI_` family comes first, then the legacy `GEMENI_` one; duplicates
/// are dropped later by [`AppConfig::merge_api_keys`].
pub fn env_api_keys(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let mut keys = Vec::new();
    for prefix in [NUMBERED_KEY_PREFIX, LEGACY_KEY_PREFIX] {
        keys.extend((1..).map_while(|n| lookup(&format!("{}{}", prefix, n))));
        keys.extend(lookup(prefix));
    }
    keys
}
