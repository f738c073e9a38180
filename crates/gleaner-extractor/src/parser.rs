//! Parse oracle output into extracted notes

use crate::error::ExtractionError;
use gleaner_domain::{ExtractedNote, Sentiment, TextPosition};
use serde_json::{Map, Value};
use tracing::warn;

/// Maximum tags kept per note
pub const MAX_TAGS: usize = 3;

/// Parse an oracle reply of the form `{"notes": [...]}`
///
/// Positions are returned exactly as reported (chunk-relative). Entries that
/// are not objects or have no content are skipped; a reply without a notes
/// array is an error for the whole chunk.
pub fn parse_notes(response: &str) -> Result<Vec<ExtractedNote>, ExtractionError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractionError::MalformedResponse("Expected JSON object".to_string()))?;

    let entries = obj
        .get("notes")
        .and_then(|v| v.as_array())
        .ok_or(ExtractionError::MissingNotes)?;

    let mut notes = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match parse_note_json(entry) {
            Ok(note) => notes.push(note),
            Err(e) => warn!("Skipping note {}: {}", idx, e),
        }
    }

    Ok(notes)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractionError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractionError::MalformedResponse("Empty code block".to_string()));
        }

        // Skip the opening fence line and a closing fence if present
        let body_end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..body_end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a single note, sanitising every field except content
fn parse_note_json(json: &Value) -> Result<ExtractedNote, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Note is not a JSON object".to_string())?;

    let content = obj
        .get("content")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing or empty 'content'".to_string())?
        .to_string();

    let sentiment = obj
        .get("sentiment")
        .and_then(|v| v.as_str())
        .map(Sentiment::parse_lenient)
        .unwrap_or_default();

    let tags = obj
        .get("tags")
        .and_then(|v| v.as_array())
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .take(MAX_TAGS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let exact_text = field(obj, "exactText", "exact_text")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let text_position = field(obj, "textPosition", "text_position").and_then(parse_position);

    let title = obj
        .get("title")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ExtractedNote {
        content,
        sentiment,
        tags,
        exact_text,
        text_position,
        title,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    obj.get(camel).or_else(|| obj.get(snake))
}

/// Both ends must be non-negative integers; `{0, 0}` means "unknown"
fn parse_position(value: &Value) -> Option<TextPosition> {
    let start = value.get("start").and_then(as_offset)?;
    let end = value.get("end").and_then(as_offset)?;

    if start == 0 && end == 0 {
        return None;
    }
    Some(TextPosition::new(start, end))
}

fn as_offset(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    // 12.0 is still an integer offset
    value
        .as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
        .map(|f| f as usize)
}
