//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FOUNDER_PROFILER` prefix and nested values use double underscores as separators.
//! The conventional `OPENAI_API_KEY` variable is honored as a default for the key.
//!
//! # Example
//!
//! ```no_run
//! use founder_profiler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing profiles to {}", config.output.directory.display());
//! ```

mod ai;
mod error;
mod extraction;
mod output;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use extraction::ExtractionConfig;
pub use output::OutputConfig;

use serde::Deserialize;

/// Plain variable most OpenAI tooling reads the key from.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion service configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Chunking and fan-out settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Where profiles are written
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Uses `OPENAI_API_KEY` as the default API key when set
    /// 3. Reads environment variables with `FOUNDER_PROFILER` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FOUNDER_PROFILER__AI__MODEL=gpt-4o` -> `ai.model = gpt-4o`
    /// - `FOUNDER_PROFILER__EXTRACTION__FAN_OUT=fail_fast` -> `extraction.fan_out`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = std::env::var(OPENAI_API_KEY_VAR) {
            builder = builder.set_default("ai.openai_api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("FOUNDER_PROFILER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including a missing API key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.extraction.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{FanOutPolicy, OversizeParagraphPolicy};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        OPENAI_API_KEY_VAR,
        "FOUNDER_PROFILER__AI__OPENAI_API_KEY",
        "FOUNDER_PROFILER__AI__MODEL",
        "FOUNDER_PROFILER__AI__MAX_ATTEMPTS",
        "FOUNDER_PROFILER__EXTRACTION__MAX_CHUNK_TOKENS",
        "FOUNDER_PROFILER__EXTRACTION__FAN_OUT",
        "FOUNDER_PROFILER__EXTRACTION__OVERSIZE_PARAGRAPH",
    ];

    /// Helper to clear environment variables around each test
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert!(config.ai.openai_api_key.is_none());
        assert_eq!(config.ai.model, "gpt-4-0125-preview");
        assert_eq!(config.extraction.max_chunk_tokens, 100_000);
        assert_eq!(config.output.directory, std::path::PathBuf::from("extracted_data"));
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_plain_openai_key_is_honored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(OPENAI_API_KEY_VAR, "sk-plain");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-plain"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_key_overrides_plain_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(OPENAI_API_KEY_VAR, "sk-plain");
        env::set_var("FOUNDER_PROFILER__AI__OPENAI_API_KEY", "sk-prefixed");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().ai.openai_api_key.as_deref(), Some("sk-prefixed"));
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FOUNDER_PROFILER__AI__OPENAI_API_KEY", "sk-test");
        env::set_var("FOUNDER_PROFILER__AI__MODEL", "gpt-4o");
        env::set_var("FOUNDER_PROFILER__AI__MAX_ATTEMPTS", "5");
        env::set_var("FOUNDER_PROFILER__EXTRACTION__MAX_CHUNK_TOKENS", "8000");
        env::set_var("FOUNDER_PROFILER__EXTRACTION__FAN_OUT", "fail_fast");
        env::set_var("FOUNDER_PROFILER__EXTRACTION__OVERSIZE_PARAGRAPH", "hard_split");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.ai.max_attempts, 5);
        assert_eq!(config.extraction.max_chunk_tokens, 8000);
        assert_eq!(config.extraction.fan_out, FanOutPolicy::FailFast);
        assert_eq!(
            config.extraction.oversize_paragraph,
            OversizeParagraphPolicy::HardSplit
        );
        assert!(config.validate().is_ok());
    }
}
