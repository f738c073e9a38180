//! Short titles for notes that arrive without one

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "this", "that", "these", "those", "it", "its", "there", "their",
    "they", "we", "our", "you", "your", "my", "mine", "his", "her", "hers",
];

const MAX_TITLE_WORDS: usize = 8;
const MAX_TITLE_CHARS: usize = 60;
const FALLBACK_CHARS: usize = 50;
const UNTITLED: &str = "Untitled Note";

/// Derive a title from note content
///
/// Picks the most representative sentence (10 to 100 characters, favouring
/// meaningful words, a length near 40 and the opening sentence) and keeps its
/// first eight words.
///
/// # Examples
///
/// ```
/// use gleaner_extractor::generate_title;
///
/// let title = generate_title("borrow checking prevents data races at compile time. It is strict.");
/// assert_eq!(title, "Borrow checking prevents data races at compile time");
/// assert_eq!(generate_title(""), "Untitled Note");
/// ```
pub fn generate_title(content: &str) -> String {
    let sentences: Vec<&str> = content
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| (10..=100).contains(&s.chars().count()))
        .collect();

    if sentences.is_empty() {
        let head: String = content.chars().take(FALLBACK_CHARS).collect();
        let head = head.trim();
        return if head.is_empty() {
            UNTITLED.to_string()
        } else {
            head.to_string()
        };
    }

    let mut best = sentences[0];
    let mut best_score = f64::MIN;
    for (idx, &sentence) in sentences.iter().enumerate() {
        let score = score_sentence(sentence, idx == 0);
        if score > best_score {
            best = sentence;
            best_score = score;
        }
    }

    let title = capitalize_first(
        &best
            .split_whitespace()
            .take(MAX_TITLE_WORDS)
            .collect::<Vec<_>>()
            .join(" "),
    );

    if title.chars().count() > MAX_TITLE_CHARS {
        let cut: String = title.chars().take(MAX_TITLE_CHARS).collect();
        let words: Vec<&str> = cut.split(' ').collect();
        return format!("{}...", words[..words.len() - 1].join(" "));
    }

    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn score_sentence(sentence: &str, is_first: bool) -> f64 {
    let lower = sentence.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let meaningful = words
        .iter()
        .filter(|w| !STOP_WORDS.contains(*w) && w.chars().count() > 2)
        .count();

    let meaningful_ratio = if words.is_empty() {
        0.0
    } else {
        meaningful as f64 / words.len() as f64
    };
    let length = sentence.chars().count() as f64;
    let length_score = 1.0 - (40.0 - length).abs() / 40.0;
    let start_bonus = if is_first { 0.3 } else { 0.0 };

    meaningful_ratio * 0.5 + length_score * 0.3 + start_bonus
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => s.to_string(),
    }
}
