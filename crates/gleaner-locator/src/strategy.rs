//! Raw match strategies, tried in order

use crate::anchor::{MatchStrategy, NoteAnchor};
use crate::config::LocatorConfig;
use crate::source::{normalize_folded, normalize_whitespace, NormalizedText, SourceText};

/// A `[start, end)` character range before post-processing
pub(crate) type RawSpan = (usize, usize);

type Strategy = fn(&NoteAnchor, &SourceText<'_>, &LocatorConfig) -> Option<RawSpan>;

/// Every strategy that can fail, in priority order
pub(crate) const STRATEGIES: &[(MatchStrategy, Strategy)] = &[
    (MatchStrategy::ExactQuote, exact_quote),
    (MatchStrategy::ExactQuoteProbe, exact_quote_probe),
    (MatchStrategy::StoredPosition, stored_position),
    (MatchStrategy::ContentExact, content_exact),
    (MatchStrategy::ContentNormalized, content_normalized),
    (MatchStrategy::ContentPhrase, content_phrase),
];

fn exact_quote(anchor: &NoteAnchor, source: &SourceText<'_>, config: &LocatorConfig) -> Option<RawSpan> {
    let quote = anchor.exact_text.as_deref()?;
    let len = quote.chars().count();
    if len < config.min_exact_quote_chars {
        return None;
    }
    source.find(quote).map(|start| (start, start + len))
}

fn exact_quote_probe(
    anchor: &NoteAnchor,
    source: &SourceText<'_>,
    config: &LocatorConfig,
) -> Option<RawSpan> {
    let quote = anchor.exact_text.as_deref()?;
    let words: Vec<&str> = quote.split_whitespace().collect();
    if words.len() < config.probe_words {
        return None;
    }

    let probe = words[..config.probe_words].join(" ");
    let start = source.find(&probe)?;
    Some(paragraph_around(source, start, start + probe.chars().count(), config))
}

fn stored_position(anchor: &NoteAnchor, source: &SourceText<'_>, _: &LocatorConfig) -> Option<RawSpan> {
    let pos = anchor.text_position?;
    (pos.end > 0 && pos.end <= source.len() && pos.start < pos.end).then_some((pos.start, pos.end))
}

fn content_exact(anchor: &NoteAnchor, source: &SourceText<'_>, _: &LocatorConfig) -> Option<RawSpan> {
    let content = anchor.content.trim();
    source
        .find(content)
        .map(|start| (start, start + content.chars().count()))
}

fn content_normalized(anchor: &NoteAnchor, source: &SourceText<'_>, _: &LocatorConfig) -> Option<RawSpan> {
    let needle = normalize_whitespace(&anchor.content);
    if needle.is_empty() {
        return None;
    }
    NormalizedText::new(source, false).find_original(&needle)
}

fn content_phrase(anchor: &NoteAnchor, source: &SourceText<'_>, config: &LocatorConfig) -> Option<RawSpan> {
    let folded_content = normalize_folded(&anchor.content);
    let words: Vec<&str> = folded_content.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() < config.probe_words {
        return None;
    }

    let folded_source = NormalizedText::new(source, true);
    if !folded_source.contains(&folded_content) {
        return None;
    }

    phrase_probes(&words, config.probe_words)
        .into_iter()
        .filter(|probe| probe.chars().count() >= config.min_probe_chars)
        .find_map(|probe| folded_source.find_original(&probe))
        .map(|(start, end)| paragraph_around(source, start, end, config))
}

/// Opening, middle and closing word windows
fn phrase_probes(words: &[&str], width: usize) -> Vec<String> {
    let mut probes = vec![words[..width].join(" ")];
    if words.len() >= width * 2 {
        let mid = words.len() / 2 - width / 2;
        probes.push(words[mid..mid + width].join(" "));
    }
    probes.push(words[words.len() - width..].join(" "));
    probes
}

/// Widen a hit to the paragraph containing it
fn paragraph_around(
    source: &SourceText<'_>,
    hit_start: usize,
    hit_end: usize,
    config: &LocatorConfig,
) -> RawSpan {
    let start = source
        .rfind_before("\n\n", hit_start)
        .map(|idx| idx + 2)
        .unwrap_or(0)
        .min(hit_start);

    let end = match source.find_from("\n\n", hit_start) {
        Some(idx) => idx.max(hit_end),
        None => (start + config.paragraph_fallback_chars)
            .min(source.len())
            .max(hit_end),
    };

    (start, end)
}

/// Opening paragraph, or the first few characters
pub(crate) fn fallback(source: &SourceText<'_>, config: &LocatorConfig) -> RawSpan {
    match source.find("\n\n") {
        Some(idx) if idx > 0 => (0, idx),
        _ => (0, config.fallback_chars.min(source.len())),
    }
}
