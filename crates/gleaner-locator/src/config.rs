//! Thresholds for span location

use serde::{Deserialize, Serialize};

/// Tunable thresholds for [`SpanLocator`](crate::SpanLocator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Shortest exact quote searched literally (characters)
    pub min_exact_quote_chars: usize,

    /// Words per probe phrase
    pub probe_words: usize,

    /// Shortest content probe phrase (characters)
    pub min_probe_chars: usize,

    /// Paragraph length assumed when no blank line follows a probe hit
    pub paragraph_fallback_chars: usize,

    /// Span length used when nothing matched and the source has no blank line
    pub fallback_chars: usize,

    /// Longest span ever returned (characters)
    pub max_span_chars: usize,
}

impl LocatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.probe_words == 0 {
            return Err("probe_words must be greater than 0".to_string());
        }
        if self.max_span_chars == 0 {
            return Err("max_span_chars must be greater than 0".to_string());
        }
        if self.fallback_chars > self.max_span_chars
            || self.paragraph_fallback_chars > self.max_span_chars
        {
            return Err("fallback lengths cannot exceed max_span_chars".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            min_exact_quote_chars: 10,
            probe_words: 5,
            min_probe_chars: 20,
            paragraph_fallback_chars: 500,
            fallback_chars: 100,
            max_span_chars: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LocatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_span() {
        let config = LocatorConfig {
            max_span_chars: 0,
            ..LocatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_fallback_longer_than_span() {
        let config = LocatorConfig {
            max_span_chars: 50,
            ..LocatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LocatorConfig::from_toml("min_exact_quote_chars = 4\n").unwrap();
        assert_eq!(config.min_exact_quote_chars, 4);
        assert_eq!(config.max_span_chars, 2_000);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LocatorConfig::default();
        let parsed = LocatorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
