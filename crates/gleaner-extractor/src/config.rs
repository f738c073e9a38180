//! Configuration for note generation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the chunker, the extraction client and the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum chunk size (characters)
    pub max_chunk_size: usize,

    /// How far back from a tentative cut to look for a paragraph break
    pub paragraph_lookback: usize,

    /// How far back from a tentative cut to look for a sentence break
    pub sentence_lookback: usize,

    /// Lower bound for the per-note character limit
    pub min_char_limit: usize,

    /// Upper bound for the per-note character limit
    pub max_char_limit: usize,

    /// Notes requested when the caller does not say
    pub default_notes: usize,

    /// Character limit used when the caller does not say
    pub default_char_limit: usize,

    /// Maximum time for a single oracle call (seconds)
    pub extraction_timeout_secs: u64,

    /// Pause between streamed notes (milliseconds)
    pub emit_delay_ms: u64,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Get the pacing delay as a Duration
    pub fn emit_delay(&self) -> Duration {
        Duration::from_millis(self.emit_delay_ms)
    }

    /// Clamp a requested character limit into the configured bounds
    pub fn clamp_char_limit(&self, char_limit: usize) -> usize {
        char_limit.clamp(self.min_char_limit, self.max_char_limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.max_chunk_size > self.max_text_length {
            return Err("max_chunk_size cannot exceed max_text_length".to_string());
        }
        if self.paragraph_lookback > self.max_chunk_size
            || self.sentence_lookback > self.max_chunk_size
        {
            return Err("lookback widths cannot exceed max_chunk_size".to_string());
        }
        if self.min_char_limit == 0 || self.min_char_limit > self.max_char_limit {
            return Err("char limit bounds must satisfy 0 < min_char_limit <= max_char_limit".to_string());
        }
        if self.default_notes == 0 {
            return Err("default_notes must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 200_000,
            max_chunk_size: 4_000,
            paragraph_lookback: 500,
            sentence_lookback: 200,
            min_char_limit: 120,
            max_char_limit: 360,
            default_notes: 3,
            default_char_limit: 280,
            extraction_timeout_secs: 60,
            emit_delay_ms: 0,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: shorter timeouts and smaller inputs for faster runs
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 50_000,
            max_chunk_size: 2_000,
            paragraph_lookback: 250,
            sentence_lookback: 100,
            extraction_timeout_secs: 30,
            ..Self::default()
        }
    }

    /// Lenient preset: longer timeouts and paced output for interactive use
    pub fn lenient() -> Self {
        Self {
            max_text_length: 1_000_000,
            extraction_timeout_secs: 180,
            emit_delay_ms: 300,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
