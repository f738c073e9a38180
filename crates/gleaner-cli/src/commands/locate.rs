//! Locate command implementation.

use crate::cli::LocateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use gleaner_locator::{NoteAnchor, ResolvedSpan, SpanLocator};

use super::read_source;

/// Execute the locate command.
pub fn execute_locate(args: LocateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let source = read_source(Some(&args.file))?;
    let span = locate_note(&args, config, &source);

    println!("{}", formatter.format_span(&span, span.text(&source))?);
    Ok(())
}

/// Resolve the span described by `args` within `source`.
pub fn locate_note(args: &LocateArgs, config: &Config, source: &str) -> ResolvedSpan {
    let mut anchor = NoteAnchor::new(args.content.clone());
    if let Some(quote) = args.quote.as_deref().filter(|q| !q.trim().is_empty()) {
        anchor = anchor.with_exact_text(quote);
    }
    if let (Some(start), Some(end)) = (args.start, args.end) {
        anchor = anchor.with_position(start, end);
    }

    SpanLocator::with_config(config.locator.clone()).locate(&anchor, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_locator::MatchStrategy;
    use std::path::PathBuf;

    const ANIMALS: &str = "Cats are great. Dogs are loyal and kind. Birds can fly.";

    fn args(content: &str) -> LocateArgs {
        LocateArgs {
            file: PathBuf::from("-"),
            content: content.to_string(),
            quote: None,
            start: None,
            end: None,
        }
    }

    #[test]
    fn test_locate_by_quote() {
        let args = LocateArgs {
            quote: Some("Dogs are loyal and kind.".to_string()),
            ..args("Dogs are loyal companions")
        };
        let span = locate_note(&args, &Config::default(), ANIMALS);
        assert_eq!((span.start, span.end), (16, 40));
        assert_eq!(span.strategy, MatchStrategy::ExactQuote);
    }

    #[test]
    fn test_locate_by_position() {
        let args = LocateArgs {
            start: Some(41),
            end: Some(55),
            ..args("flight")
        };
        let span = locate_note(&args, &Config::default(), ANIMALS);
        assert_eq!(span.strategy, MatchStrategy::StoredPosition);
        assert_eq!(span.text(ANIMALS), "Birds can fly.");
    }

    #[test]
    fn test_blank_quote_is_ignored() {
        let args = LocateArgs {
            quote: Some("   ".to_string()),
            ..args("Cats are great.")
        };
        let span = locate_note(&args, &Config::default(), ANIMALS);
        assert_eq!(span.strategy, MatchStrategy::ContentExact);
    }
}
