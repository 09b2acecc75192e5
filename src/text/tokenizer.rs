// Tokenization: raw feedback text to lowercase word tokens.
//
// Any run of non-alphanumeric characters is a separator, so punctuation and
// whitespace never show up as tokens. There's no failure mode: odd input just
// yields fewer (or zero) tokens.

use super::frequency::FrequencyTable;
use super::stop_list::StopWords;

/// Split text into lowercase alphanumeric tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenizer plus stop-word filter, configured once and shared read-only.
///
/// Holding the stop list here (instead of in a global) lets tests run with
/// their own vocabulary.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    stop_words: StopWords,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl TextAnalyzer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Drop stop words from an existing token sequence, preserving order.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    /// Tokenize and filter in one step.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.filter(tokenize(text))
    }

    /// Count the surviving tokens of `text`.
    pub fn word_frequency(&self, text: &str) -> FrequencyTable {
        self.analyze(text).into_iter().collect()
    }
}
