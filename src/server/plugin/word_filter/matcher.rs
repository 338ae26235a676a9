//! Whole-word, case-insensitive detection of blocked terms.

use regex::{Regex, RegexBuilder};

use crate::server::error::AppError;

/// Compiled blocked word list.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    words: Vec<String>,
    pattern: Option<Regex>,
}

impl WordMatcher {
    /// Builds a matcher from the blocked terms, ignoring blank entries.
    ///
    /// Terms are escaped, so punctuation in a term is matched literally.
    pub fn new(words: &[String]) -> Result<Self, AppError> {
        let words: Vec<String> = words
            .iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self {
                words,
                pattern: None,
            });
        }

        let alternation = words
            .iter()
            .map(|word| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Blocked word list is invalid: {}", e)))?;

        Ok(Self {
            words,
            pattern: Some(pattern),
        })
    }

    /// Whether this matcher was built from the given list.
    pub fn is_for(&self, words: &[String]) -> bool {
        let trimmed = words
            .iter()
            .map(|word| word.trim())
            .filter(|word| !word.is_empty());

        trimmed.eq(self.words.iter().map(String::as_str))
    }

    /// First blocked term found in the content, as written in the content.
    pub fn find<'c>(&self, content: &'c str) -> Option<&'c str> {
        self.pattern
            .as_ref()
            .and_then(|pattern| pattern.find(content))
            .map(|found| found.as_str())
    }
}
