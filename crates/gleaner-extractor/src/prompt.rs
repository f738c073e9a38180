//! Instructions sent to the oracle with every chunk

/// Builds the system prompt for one extraction call
///
/// The chunk text itself travels separately as the user message.
pub struct PromptBuilder {
    notes_wanted: usize,
    char_limit: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(notes_wanted: usize, char_limit: usize) -> Self {
        Self {
            notes_wanted,
            char_limit,
        }
    }

    /// Build the complete system prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ROLE);
        prompt.push_str("\n\n");

        prompt.push_str("Respond ONLY with a JSON object in this exact format:\n");
        prompt.push_str(&output_format(self.char_limit));
        prompt.push_str("\n\n");

        prompt.push_str("Rules:\n");
        prompt.push_str(&format!(
            "1. Each note's content MUST be {} characters or less\n",
            self.char_limit
        ));
        prompt.push_str(&format!(
            "2. Extract exactly {} of the most important and distinct points\n",
            self.notes_wanted
        ));
        prompt.push_str(RULES);

        prompt
    }
}

const ROLE: &str = "You are an expert note extraction assistant skilled in knowledge distillation. \
Extract the most valuable insights from the text the user sends and turn them into concise, \
self-contained notes.";

fn output_format(char_limit: usize) -> String {
    format!(
        r#"{{
  "notes": [
    {{
      "content": "the key insight (max {} chars)",
      "sentiment": "positive" | "neutral" | "negative",
      "tags": ["at most", "three", "tags"],
      "textPosition": {{ "start": 34, "end": 109 }},
      "exactText": "the exact passage from the text this note is based on"
    }}
  ]
}}"#,
        char_limit
    )
}

const RULES: &str = r#"3. Focus on actionable insights, key facts and conceptual understanding
4. Make each note independently valuable
5. Use simple, clear language but keep technical precision
6. Sentiment: "positive" for advantageous or optimistic information, "neutral" for factual or contextual information, "negative" for cautionary or problematic information
7. Tags categorise the note's domain, topic and key concepts; use at most 3
8. textPosition.start and textPosition.end are character indexes into the user's text delimiting the passage the note is based on
9. exactText is that passage copied verbatim
10. Return ONLY the JSON object, no markdown code blocks, no explanations"#;
