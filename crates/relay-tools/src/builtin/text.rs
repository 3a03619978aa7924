use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use relay_core::{Context, ToolDefinition, ToolParameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TRIM_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '"'];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub word_count: usize,
    pub character_count: usize,
    pub most_common_word: String,
    pub most_common_count: usize,
}

/// Word statistics over lower-cased, whitespace-split tokens.
///
/// `word_count` counts tokens before punctuation is stripped. Ties for the
/// most common word go to the one seen first.
pub fn analyze(text: &str) -> WordStats {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut freq: Vec<(&str, usize)> = Vec::new();
    for token in &tokens {
        let word = token.trim_matches(TRIM_CHARS);
        match freq.iter_mut().find(|(w, _)| *w == word) {
            Some((_, count)) => *count += 1,
            None => freq.push((word, 1)),
        }
    }

    let (most_common_word, most_common_count) = freq
        .iter()
        .fold(("", 0), |best, &(w, c)| if c > best.1 { (w, c) } else { best });

    WordStats {
        word_count: tokens.len(),
        character_count: text.chars().count(),
        most_common_word: most_common_word.to_string(),
        most_common_count,
    }
}

pub struct WordAnalyzerTool {
    def: ToolDefinition,
}

impl WordAnalyzerTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "word_analyzer",
            "Analyze text and return word count, character count and most common word",
        )
        .with_required_param("text", ToolParameter::string().with_description("Text to analyze"))
        .with_category("demo");
        Self { def }
    }
}

impl Default for WordAnalyzerTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct WordAnalyzerInput {
    text: String,
}

#[async_trait]
impl Tool for WordAnalyzerTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: WordAnalyzerInput = parse_input(self.name(), input)?;
        ToolOutput::json(&analyze(&input.text))
    }
}
