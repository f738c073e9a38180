//! Widening raw matches to readable spans

use crate::source::SourceText;

/// Characters that may end a sentence when scanning backward
fn is_start_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ':' | ';')
}

/// Characters that end a sentence when scanning forward
fn is_end_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201d}' | '\u{2019}')
}

/// Widen `[start, end)` to sentence boundaries, then to word boundaries if
/// that came out empty, then cap the length at `max_len` around the raw
/// midpoint
pub(crate) fn expand(source: &SourceText<'_>, start: usize, end: usize, max_len: usize) -> (usize, usize) {
    let len = source.len();
    let end = end.min(len);
    let start = start.min(end);

    let mut s = if at_sentence_start(source, start) {
        start
    } else {
        scan_back(source, start)
    };
    let mut e = if at_sentence_end(source, start, end) {
        end
    } else {
        scan_forward(source, end)
    };

    if s >= e {
        (s, e) = word_bounds(source, start, end);
    }

    if e - s > max_len {
        let mid = start + (end - start) / 2;
        s = mid.saturating_sub(max_len / 2);
        e = (s + max_len).min(len);
        if e - s < max_len {
            s = e.saturating_sub(max_len);
        }
    }

    (s, e)
}

/// True if the terminator just before `after` closes a sentence: only
/// closers and then whitespace or the end of text may follow it
fn closes_sentence(chars: &[char], after: usize) -> bool {
    let mut p = after;
    while p < chars.len() && is_closer(chars[p]) {
        p += 1;
    }
    chars.get(p).is_none_or(|c| c.is_whitespace())
}

/// True unless the next word starts in lowercase, as after "e.g." or "vs."
///
/// A lowercase sentence following a real full stop is misread as a
/// continuation; the scan then stops at the terminator before it.
fn opens_sentence(source: &SourceText<'_>, from: usize) -> bool {
    let chars = source.chars();
    let mut p = from;
    while p < chars.len() && chars[p].is_whitespace() {
        if source.blank_line_at(p) {
            return true;
        }
        p += 1;
    }
    chars.get(p).is_none_or(|c| !c.is_lowercase())
}

fn at_sentence_start(source: &SourceText<'_>, start: usize) -> bool {
    let chars = source.chars();
    let mut p = start;
    let mut saw_space = false;

    while p > 0 && chars[p - 1].is_whitespace() {
        if p >= 2 && source.blank_line_at(p - 2) {
            return true;
        }
        saw_space = true;
        p -= 1;
    }
    if p == 0 {
        return true;
    }
    if !saw_space {
        return false;
    }

    while p > 0 && is_closer(chars[p - 1]) {
        p -= 1;
    }
    p > 0 && is_start_terminator(chars[p - 1]) && opens_sentence(source, start)
}

fn at_sentence_end(source: &SourceText<'_>, start: usize, end: usize) -> bool {
    if end >= source.len() || source.blank_line_at(end) {
        return true;
    }

    let chars = source.chars();
    let mut q = end;
    while q > start && chars[q - 1].is_whitespace() {
        q -= 1;
    }
    while q > start && is_closer(chars[q - 1]) {
        q -= 1;
    }
    q > start && is_end_terminator(chars[q - 1]) && closes_sentence(chars, q)
}

fn scan_back(source: &SourceText<'_>, start: usize) -> usize {
    let chars = source.chars();
    let mut s = start;

    while s > 0 && chars[s - 1].is_whitespace() {
        s -= 1;
    }
    while s > 0 {
        let followed_by_space = chars.get(s).is_none_or(|c| c.is_whitespace());
        if is_start_terminator(chars[s - 1]) && followed_by_space && opens_sentence(source, s) {
            break;
        }
        if s >= 2 && source.blank_line_at(s - 2) {
            break;
        }
        s -= 1;
    }
    s
}

fn scan_forward(source: &SourceText<'_>, end: usize) -> usize {
    let chars = source.chars();
    let len = chars.len();
    let mut e = end;

    while e < len && chars[e].is_whitespace() && !source.blank_line_at(e) {
        e += 1;
    }
    while e < len {
        if source.blank_line_at(e) {
            break;
        }
        if is_end_terminator(chars[e]) && closes_sentence(chars, e + 1) {
            e += 1;
            while e < len && is_closer(chars[e]) {
                e += 1;
            }
            break;
        }
        e += 1;
    }
    e
}

fn word_bounds(source: &SourceText<'_>, start: usize, end: usize) -> (usize, usize) {
    let chars = source.chars();
    let mut s = start;
    while s > 0 && !chars[s - 1].is_whitespace() {
        s -= 1;
    }
    let mut e = end;
    while e < chars.len() && !chars[e].is_whitespace() {
        e += 1;
    }
    (s, e.max(s))
}
