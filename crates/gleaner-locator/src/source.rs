//! Character-indexed views of the source text

/// Source text with character/byte offset tables
///
/// Searches run on the underlying `str` and report character offsets.
pub struct SourceText<'a> {
    text: &'a str,
    chars: Vec<char>,
    byte_at: Vec<usize>,
}

impl<'a> SourceText<'a> {
    /// Index a source text
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_at = Vec::with_capacity(text.len() + 1);
        for (byte, c) in text.char_indices() {
            chars.push(c);
            byte_at.push(byte);
        }
        byte_at.push(text.len());

        Self { text, chars, byte_at }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for the empty source
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters of the source
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `idx`, if in range
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// First occurrence of `needle`, as a character offset
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.find_from(needle, 0)
    }

    /// First occurrence of `needle` starting at or after character `from`
    pub fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        if needle.is_empty() || from > self.len() {
            return None;
        }
        let byte_from = self.byte_at[from];
        self.text[byte_from..]
            .find(needle)
            .map(|b| char_offset(&self.byte_at, byte_from + b))
    }

    /// Last occurrence of `needle` that ends at or before character `before`
    pub fn rfind_before(&self, needle: &str, before: usize) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let byte_end = self.byte_at[before.min(self.len())];
        self.text[..byte_end]
            .rfind(needle)
            .map(|b| char_offset(&self.byte_at, b))
    }

    /// True if a blank line (`"\n\n"`) starts at character `idx`
    pub fn blank_line_at(&self, idx: usize) -> bool {
        self.char_at(idx) == Some('\n') && self.char_at(idx + 1) == Some('\n')
    }

    /// Substring between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.byte_at[start]..self.byte_at[end]]
    }
}

/// Text with whitespace runs collapsed to one space, remembering where each
/// character came from
pub struct NormalizedText {
    text: String,
    byte_at: Vec<usize>,
    origin: Vec<usize>,
}

impl NormalizedText {
    /// Collapse whitespace runs of `source`, optionally case-folding
    pub fn new(source: &SourceText<'_>, fold_case: bool) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut byte_at = Vec::with_capacity(source.len() + 1);
        let mut origin = Vec::with_capacity(source.len());
        let mut in_space = false;

        for (idx, &c) in source.chars().iter().enumerate() {
            if c.is_whitespace() {
                if in_space {
                    continue;
                }
                in_space = true;
                byte_at.push(text.len());
                origin.push(idx);
                text.push(' ');
            } else {
                in_space = false;
                byte_at.push(text.len());
                origin.push(idx);
                text.push(if fold_case { fold(c) } else { c });
            }
        }
        byte_at.push(text.len());

        Self { text, byte_at, origin }
    }

    /// Normalized text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// First occurrence of `needle`, mapped back to a `[start, end)` range of
    /// the original source
    pub fn find_original(&self, needle: &str) -> Option<(usize, usize)> {
        if needle.is_empty() {
            return None;
        }
        let byte = self.text.find(needle)?;
        let start = char_offset(&self.byte_at, byte);
        let end = char_offset(&self.byte_at, byte + needle.len());
        if end <= start {
            return None;
        }
        Some((self.origin[start], self.origin[end - 1] + 1))
    }

    /// True if `needle` occurs anywhere
    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.text.contains(needle)
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize_whitespace`] plus per-character case folding
pub fn normalize_folded(s: &str) -> String {
    normalize_whitespace(s).chars().map(fold).collect()
}

/// One-to-one lowercase mapping so offsets survive folding
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn char_offset(byte_at: &[usize], byte: usize) -> usize {
    byte_at.partition_point(|&b| b < byte)
}
