//! Splitting long documents into oracle-sized windows

use crate::config::ExtractorConfig;
use gleaner_domain::Chunk;

/// Chunks text into windows that prefer paragraph, then sentence, boundaries
///
/// All sizes and offsets are in characters.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chunk_size: usize,
    paragraph_lookback: usize,
    sentence_lookback: usize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: usize, paragraph_lookback: usize, sentence_lookback: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
            paragraph_lookback,
            sentence_lookback,
        }
    }

    /// Create a chunker from the extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(
            config.max_chunk_size,
            config.paragraph_lookback,
            config.sentence_lookback,
        )
    }

    /// Chunk the given text
    ///
    /// Short text comes back as a single untrimmed chunk at offset 0. Longer
    /// text is cut greedily; every window is trimmed and its `base_offset`
    /// points at the first kept character, so
    /// `source[base_offset..base_offset + len]` is exactly the chunk text.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.max_chunk_size {
            return vec![Chunk::new(text, 0)];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = self.cut_point(&chars, start);
            let window = &chars[start..end];

            let leading = window.iter().take_while(|c| c.is_whitespace()).count();
            let trailing = window[leading..]
                .iter()
                .rev()
                .take_while(|c| c.is_whitespace())
                .count();

            if leading < window.len() {
                let kept: String = window[leading..window.len() - trailing].iter().collect();
                chunks.push(Chunk::new(kept, start + leading));
            }

            start = end;
        }

        chunks
    }

    /// End (exclusive) of the window starting at `start`; always `> start`
    fn cut_point(&self, chars: &[char], start: usize) -> usize {
        let end = (start + self.max_chunk_size).min(chars.len());
        if end == chars.len() {
            return end;
        }

        if let Some(brk) = rfind_pair(chars, ['\n', '\n'], end) {
            if brk > start && brk + self.paragraph_lookback > end {
                return brk;
            }
        }

        // the period must land inside the window
        if let Some(brk) = rfind_pair(chars, ['.', ' '], end - 1) {
            if brk > start && brk + self.sentence_lookback > end {
                return brk + 1;
            }
        }

        end
    }
}

/// Last index `i <= from` where `chars[i..i + 2] == pair`
fn rfind_pair(chars: &[char], pair: [char; 2], from: usize) -> Option<usize> {
    if chars.len() < 2 {
        return None;
    }
    let last = from.min(chars.len() - 2);
    (0..=last)
        .rev()
        .find(|&i| chars[i] == pair[0] && chars[i + 1] == pair[1])
}
