//! Sentiment attached to each note

use std::fmt;

/// Tone of the source passage a note was distilled from
///
/// - Positive: advantageous, beneficial or optimistic information
/// - Neutral: factual, balanced or contextual information
/// - Negative: cautionary, problematic or challenging information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sentiment {
    /// Advantageous or optimistic
    Positive,

    /// Factual or balanced
    #[default]
    Neutral,

    /// Cautionary or problematic
    Negative,
}

impl Sentiment {
    /// Get the sentiment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse a sentiment, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Parse a sentiment, falling back to [`Sentiment::Neutral`]
    ///
    /// Oracles occasionally invent labels ("mixed", "informative"); those are
    /// treated as neutral rather than dropping the note.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse() {
        assert_eq!(Sentiment::parse("positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("NEGATIVE"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::parse(" Neutral "), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::parse("mixed"), None);
    }

    #[test]
    fn test_sentiment_lenient_defaults_to_neutral() {
        assert_eq!(Sentiment::parse_lenient("mixed"), Sentiment::Neutral);
        assert_eq!(Sentiment::parse_lenient(""), Sentiment::Neutral);
        assert_eq!(Sentiment::parse_lenient("negative"), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_display_round_trip() {
        for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            assert_eq!(Sentiment::parse(&sentiment.to_string()), Some(sentiment));
        }
    }
}
