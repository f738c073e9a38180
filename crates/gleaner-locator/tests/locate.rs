use gleaner_domain::{ExtractedNote, NoteDraft};
use gleaner_locator::{locate, LocatorConfig, MatchStrategy, NoteAnchor, SpanLocator};
use proptest::prelude::*;

const ANIMALS: &str = "Cats are great. Dogs are loyal and kind. Birds can fly.";

#[test]
fn test_exact_quote_wins() {
    let anchor = NoteAnchor::new("Dogs make good companions")
        .with_exact_text("Dogs are loyal and kind.")
        .with_position(0, 5);

    let span = locate(&anchor, ANIMALS);
    assert_eq!(span.strategy, MatchStrategy::ExactQuote);
    assert_eq!((span.start, span.end), (16, 40));
    assert_eq!(span.text(ANIMALS), "Dogs are loyal and kind.");
}

#[test]
fn test_content_fragment_widens_to_sentence() {
    let source = "Intro text. The key point is X. More text follows.";
    let span = locate(&NoteAnchor::new("key point is X"), source);

    assert_eq!(span.strategy, MatchStrategy::ContentExact);
    assert_eq!((span.start, span.end), (11, 31));
    assert_eq!(span.text(source), " The key point is X.");
}

#[test]
fn test_whitespace_insensitive_content() {
    let source = "The gauge showed value:   42   units at noon. Then it fell.";
    let span = locate(&NoteAnchor::new("value: 42 units"), source);

    assert_eq!(span.strategy, MatchStrategy::ContentNormalized);
    assert_eq!(span.text(source), "The gauge showed value:   42   units at noon.");
}

#[test]
fn test_stored_position_used_when_quote_missing() {
    let anchor = NoteAnchor::new("Birds fly")
        .with_exact_text("not present anywhere in the text")
        .with_position(41, 55);

    let span = locate(&anchor, ANIMALS);
    assert_eq!(span.strategy, MatchStrategy::StoredPosition);
    assert_eq!(span.text(ANIMALS), "Birds can fly.");
}

#[test]
fn test_stored_position_ending_in_a_number_widens_past_it() {
    let source = "Revenue grew 3.5 percent in Q1. Costs fell.";
    let span = locate(&NoteAnchor::new("x").with_position(0, 15), source);

    assert_eq!(span.strategy, MatchStrategy::StoredPosition);
    assert_eq!(span.text(source), "Revenue grew 3.5 percent in Q1.");
}

#[test]
fn test_out_of_range_position_is_skipped() {
    let anchor = NoteAnchor::new("Cats are great").with_position(10, 500);

    let span = locate(&anchor, ANIMALS);
    assert_eq!(span.strategy, MatchStrategy::ContentExact);
    assert_eq!(span.text(ANIMALS), "Cats are great.");
}

#[test]
fn test_probe_finds_paraphrased_quote() {
    let source = "Preamble here.\n\nThe committee met on Tuesday to review the budget.\n\nClosing.";
    let anchor = NoteAnchor::new("x")
        .with_exact_text("The committee met on Tuesday and approved it");

    let span = locate(&anchor, source);
    assert_eq!(span.strategy, MatchStrategy::ExactQuoteProbe);
    assert_eq!(span.text(source), "The committee met on Tuesday to review the budget.");
}

#[test]
fn test_case_insensitive_phrase() {
    let source = "Notes.\n\nTHE RESULTS WERE SIGNIFICANT ACROSS ALL GROUPS.\n\nEnd.";
    let anchor = NoteAnchor::new("the results were significant across all groups.");

    let span = locate(&anchor, source);
    assert_eq!(span.strategy, MatchStrategy::ContentPhrase);
    assert_eq!(span.text(source), "THE RESULTS WERE SIGNIFICANT ACROSS ALL GROUPS.");
}

#[test]
fn test_fallback_to_first_paragraph() {
    let source = "Opening paragraph.\n\nSecond paragraph.";
    let span = locate(&NoteAnchor::new("unrelated"), source);

    assert_eq!(span.strategy, MatchStrategy::Fallback);
    assert_eq!(span.text(source), "Opening paragraph.");
}

#[test]
fn test_fallback_without_paragraphs() {
    let source = "word ".repeat(100);
    let span = locate(&NoteAnchor::new("absent"), &source);

    assert_eq!(span.strategy, MatchStrategy::Fallback);
    assert_eq!(span.start, 0);
    assert!(span.end >= 100 && span.end <= source.chars().count());
}

#[test]
fn test_empty_source() {
    let span = locate(&NoteAnchor::new("anything").with_exact_text("anything at all"), "");
    assert_eq!((span.start, span.end), (0, 0));
    assert_eq!(span.strategy, MatchStrategy::Fallback);
}

#[test]
fn test_multibyte_offsets_are_characters() {
    let source = "Résumé reviewed. Café was closed. Naïve plan.";
    let span = locate(&NoteAnchor::new("x").with_exact_text("Café was closed."), source);

    assert_eq!((span.start, span.end), (17, 33));
    assert_eq!(span.text(source), "Café was closed.");
}

#[test]
fn test_anchor_from_generated_draft() {
    let extracted = ExtractedNote::new("Birds can fly")
        .with_exact_text("Birds can fly.")
        .with_position(41, 55);
    let draft = NoteDraft::from_extracted(extracted, "Birds".to_string());

    let span = locate(&NoteAnchor::from(&draft), ANIMALS);
    assert_eq!(span.strategy, MatchStrategy::ExactQuote);
    assert_eq!(span.text(ANIMALS), "Birds can fly.");
}

#[test]
fn test_custom_thresholds() {
    let locator = SpanLocator::with_config(LocatorConfig {
        min_exact_quote_chars: 30,
        ..LocatorConfig::default()
    });
    let anchor = NoteAnchor::new("Cats are great").with_exact_text("Birds can fly.");

    assert_eq!(locator.locate(&anchor, ANIMALS).strategy, MatchStrategy::ContentExact);
    assert_eq!(locate(&anchor, ANIMALS).strategy, MatchStrategy::ExactQuote);
}

#[test]
fn test_long_match_is_capped() {
    let source = format!("{}.", "lorem ipsum ".repeat(400));
    let anchor = NoteAnchor::new("x").with_position(2_000, 2_010);

    let span = locate(&anchor, &source);
    assert_eq!(span.len(), 2_000);
    assert!(span.start <= 2_000 && span.end >= 2_010);
}

proptest! {
    #[test]
    fn prop_span_is_always_valid(
        source in "[a-zA-Zé .!?\n]{0,600}",
        content in "[a-z .]{0,40}",
        quote in proptest::option::of("[a-z .]{0,40}"),
        position in proptest::option::of((0usize..700, 0usize..700)),
    ) {
        let mut anchor = NoteAnchor::new(content);
        anchor.exact_text = quote;
        if let Some((start, end)) = position {
            anchor = anchor.with_position(start, end);
        }

        let span = locate(&anchor, &source);
        let len = source.chars().count();
        prop_assert!(span.start <= span.end);
        prop_assert!(span.end <= len);
        prop_assert!(span.len() <= 2_000);
    }

    #[test]
    fn prop_locate_is_deterministic(source in "[a-z .\n]{0,300}", content in "[a-z ]{0,30}") {
        let anchor = NoteAnchor::new(content);
        prop_assert_eq!(locate(&anchor, &source), locate(&anchor, &source));
    }
}
