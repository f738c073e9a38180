//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use gleaner_domain::SourceDocument;
use gleaner_extractor::{GenerationReport, LlmChunkExtractor, NoteGenerator};
use gleaner_locator::{NoteAnchor, ResolvedSpan, SpanLocator};
use tracing::debug;

use super::read_source;

/// Notes from one run, with their spans when requested.
#[derive(Debug)]
pub struct GeneratedNotes {
    /// The finished run
    pub report: GenerationReport,
    /// One span per note, in note order
    pub spans: Option<Vec<ResolvedSpan>>,
}

/// Execute the generate command.
pub async fn execute_generate(args: GenerateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_source(args.file.as_deref())?;
    let generated = generate_notes(&args, config, text).await?;

    println!(
        "{}",
        formatter.format_notes(&generated.report.notes, generated.spans.as_deref())?
    );
    eprintln!("{}", formatter.generation_summary(&generated.report));

    Ok(())
}

/// Run the configured provider over `text`.
pub async fn generate_notes(args: &GenerateArgs, config: &Config, text: String) -> Result<GeneratedNotes> {
    let provider = config.provider.build()?;
    let extractor = LlmChunkExtractor::new(provider, config.extractor.clone());
    let generator = NoteGenerator::new(extractor, config.extractor.clone());

    let notes_wanted = args.notes.unwrap_or(config.extractor.default_notes);
    let char_limit = args.char_limit.unwrap_or(config.extractor.default_char_limit);
    debug!(notes_wanted, char_limit, "Generating notes");

    let doc = SourceDocument::new(text);
    let report = generator.generate(&doc, notes_wanted, char_limit).await?;

    let spans = args.locate.then(|| {
        let locator = SpanLocator::with_config(config.locator.clone());
        report
            .notes
            .iter()
            .map(|note| locator.locate(&NoteAnchor::from(note), doc.text()))
            .collect()
    });

    Ok(GeneratedNotes { report, spans })
}
