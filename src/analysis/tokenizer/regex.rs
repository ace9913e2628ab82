//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{BugprepError, Result};

/// A regex-based tokenizer that extracts tokens using regular expressions.
///
/// Matching is case-preserving, left-to-right and non-overlapping; text
/// between matches is discarded.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    ///
    /// The default pattern `r"\w+"` matches sequences of word characters.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| BugprepError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Create a tokenizer for runs of `word_chars`, optionally joined by a
    /// single character of `inter_chars`.
    ///
    /// With `word_chars = "a-z"` and `inter_chars = "'-"`, `well-known` and
    /// `don't` are single tokens while `a--b` yields `a` and `b`.
    pub fn for_identifiers(word_chars: &str, inter_chars: &str) -> Result<Self> {
        Self::with_pattern(&identifier_pattern(word_chars, inter_chars))
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Build the token pattern for the given character-class bodies.
pub fn identifier_pattern(word_chars: &str, inter_chars: &str) -> String {
    if inter_chars.is_empty() {
        format!("[{word_chars}]+")
    } else {
        format!("[{word_chars}]+(?:[{inter_chars}][{word_chars}]+)*")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
