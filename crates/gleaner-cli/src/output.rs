//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gleaner_domain::{NoteDraft, Sentiment, TextPosition};
use gleaner_extractor::GenerationReport;
use gleaner_locator::ResolvedSpan;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format generated notes, with their resolved spans when available.
    pub fn format_notes(&self, notes: &[NoteDraft], spans: Option<&[ResolvedSpan]>) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_notes_json(notes, spans),
            OutputFormat::Table => Ok(self.format_notes_table(notes, spans)),
            OutputFormat::Quiet => Ok(notes
                .iter()
                .map(|n| n.title.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_notes_json(&self, notes: &[NoteDraft], spans: Option<&[ResolvedSpan]>) -> Result<String> {
        let json_notes: Vec<serde_json::Value> = notes
            .iter()
            .enumerate()
            .map(|(idx, n)| {
                let mut value = serde_json::json!({
                    "title": n.title,
                    "content": n.content,
                    "sentiment": n.sentiment.as_str(),
                    "tags": n.tags,
                    "exactText": n.exact_text.as_deref().unwrap_or_default(),
                    "textPosition": position_json(n.text_position),
                });
                if let Some(span) = spans.and_then(|s| s.get(idx)) {
                    value["span"] = span_json(span);
                }
                value
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_notes)?)
    }

    fn format_notes_table(&self, notes: &[NoteDraft], spans: Option<&[ResolvedSpan]>) -> String {
        if notes.is_empty() {
            return self.colorize("No notes generated.", "yellow");
        }

        let mut builder = Builder::default();
        let mut header = vec!["#", "Title", "Content", "Sentiment", "Tags", "Position"];
        if spans.is_some() {
            header.push("Span");
        }
        builder.push_record(header);

        for (idx, note) in notes.iter().enumerate() {
            let mut row = vec![
                (idx + 1).to_string(),
                note.title.clone(),
                note.content.clone(),
                self.sentiment(note.sentiment),
                note.tags.join(", "),
                position_text(note.text_position),
            ];
            if let Some(spans) = spans {
                row.push(
                    spans
                        .get(idx)
                        .map(|s| format!("{}..{} ({})", s.start, s.end, s.strategy))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a located span and the text it covers.
    pub fn format_span(&self, span: &ResolvedSpan, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut value = span_json(span);
                value["text"] = serde_json::Value::from(text);
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(format!(
                "{} {}..{} via {}\n\n{}",
                self.colorize("Span", "cyan"),
                span.start,
                span.end,
                span.strategy,
                text
            )),
            OutputFormat::Quiet => Ok(format!("{} {}", span.start, span.end)),
        }
    }

    /// One-line account of a finished run.
    pub fn generation_summary(&self, report: &GenerationReport) -> String {
        let done = format!(
            "Generated {} note(s) from {} of {} chunk(s)",
            report.notes.len(),
            report.chunks_queried,
            report.chunks_total
        );
        if report.is_partial() {
            self.warning(&format!("{}; {} chunk(s) failed", done, report.chunks_failed))
        } else {
            self.success(&done)
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn sentiment(&self, sentiment: Sentiment) -> String {
        let color = match sentiment {
            Sentiment::Positive => "green",
            Sentiment::Negative => "red",
            Sentiment::Neutral => "",
        };
        self.colorize(sentiment.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn position_text(position: Option<TextPosition>) -> String {
    position
        .map(|p| format!("{}..{}", p.start, p.end))
        .unwrap_or_else(|| "-".to_string())
}

fn position_json(position: Option<TextPosition>) -> serde_json::Value {
    let (start, end) = position.map_or((0, 0), |p| (p.start, p.end));
    serde_json::json!({ "start": start, "end": end })
}

fn span_json(span: &ResolvedSpan) -> serde_json::Value {
    serde_json::json!({
        "start": span.start,
        "end": span.end,
        "strategy": span.strategy.as_str(),
    })
}
