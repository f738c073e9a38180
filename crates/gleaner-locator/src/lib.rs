//! Gleaner Locator
//!
//! Maps a note back onto the text it was drawn from.
//!
//! # Overview
//!
//! Oracle-supplied positions are unreliable, so a note is located by trying a
//! fixed chain of strategies, strongest evidence first:
//!
//! 1. the verbatim quote
//! 2. the opening words of the quote, widened to their paragraph
//! 3. the stored position
//! 4. the content itself
//! 5. the content with whitespace runs collapsed
//! 6. case-insensitive content phrases, widened to their paragraph
//! 7. the opening paragraph of the source
//!
//! The first hit is widened to whole sentences and capped in length. Location
//! never fails; every offset is a character offset into the source.
//!
//! # Example Usage
//!
//! ```
//! use gleaner_locator::{locate, MatchStrategy, NoteAnchor};
//!
//! let source = "Cats are great. Dogs are loyal and kind. Birds can fly.";
//! let anchor = NoteAnchor::new("Dogs are faithful").with_exact_text("Dogs are loyal and kind.");
//!
//! let span = locate(&anchor, source);
//! assert_eq!(span.strategy, MatchStrategy::ExactQuote);
//! assert_eq!(span.text(source), "Dogs are loyal and kind.");
//! ```

#![warn(missing_docs)]

mod anchor;
mod boundary;
mod config;
mod source;
mod strategy;

pub use anchor::{MatchStrategy, NoteAnchor, ResolvedSpan};
pub use config::LocatorConfig;

use source::SourceText;
use tracing::debug;

/// Locates notes in their source with a fixed set of thresholds
#[derive(Debug, Clone, Default)]
pub struct SpanLocator {
    config: LocatorConfig,
}

impl SpanLocator {
    /// Locator with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator with custom thresholds
    pub fn with_config(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// The active thresholds
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Find the span of `source` that `anchor` was drawn from
    pub fn locate(&self, anchor: &NoteAnchor, source: &str) -> ResolvedSpan {
        let source = SourceText::new(source);

        let (strategy, (raw_start, raw_end)) = strategy::STRATEGIES
            .iter()
            .find_map(|(strategy, find)| find(anchor, &source, &self.config).map(|raw| (*strategy, raw)))
            .unwrap_or_else(|| (MatchStrategy::Fallback, strategy::fallback(&source, &self.config)));

        let (start, end) = boundary::expand(&source, raw_start, raw_end, self.config.max_span_chars);

        debug!(
            strategy = strategy.as_str(),
            raw_start,
            raw_end,
            start,
            end,
            "Located note span"
        );

        ResolvedSpan { start, end, strategy }
    }
}

/// Locate `anchor` in `source` with default thresholds
pub fn locate(anchor: &NoteAnchor, source: &str) -> ResolvedSpan {
    SpanLocator::new().locate(anchor, source)
}
