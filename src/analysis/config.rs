//! Settings for the normalization pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{BugprepError, Result};

/// Default token character class: word characters plus `$`.
pub const DEFAULT_WORD_CHARS: &str = r"\w$";

/// Default identifier split class: underscore, `$` and hyphen.
pub const DEFAULT_SPLIT_CHARS: &str = r"_$\-";

/// Default joining class: apostrophe and hyphen.
pub const DEFAULT_INTER_CHARS: &str = r"'\-";

/// Default minimum length of an emitted token.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Immutable settings of a [`Preprocessor`](crate::analysis::analyzer::preprocessor::Preprocessor).
///
/// The three character classes are bodies of regular-expression character
/// classes (the text between `[` and `]`), so both single characters and
/// ranges such as `a-zA-Z0-9` are accepted. A literal hyphen must be escaped
/// (`\-`) or placed last.
///
/// # Examples
///
/// ```
/// use bugprep::analysis::config::PreprocessorConfig;
///
/// let config = PreprocessorConfig::default()
///     .with_word_chars("a-zA-Z0-9$")
///     .with_inter_chars("'")
///     .with_min_length(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Characters that belong inside a token.
    pub word_chars: String,

    /// Characters on which compound identifiers are split.
    pub split_chars: String,

    /// Characters allowed to join two runs of word characters into one token.
    pub inter_chars: String,

    /// Minimum length (in characters) of a surviving token.
    pub min_length: usize,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            word_chars: DEFAULT_WORD_CHARS.to_string(),
            split_chars: DEFAULT_SPLIT_CHARS.to_string(),
            inter_chars: DEFAULT_INTER_CHARS.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl PreprocessorConfig {
    pub fn with_word_chars<S: Into<String>>(mut self, word_chars: S) -> Self {
        self.word_chars = word_chars.into();
        self
    }

    pub fn with_split_chars<S: Into<String>>(mut self, split_chars: S) -> Self {
        self.split_chars = split_chars.into();
        self
    }

    pub fn with_inter_chars<S: Into<String>>(mut self, inter_chars: S) -> Self {
        self.inter_chars = inter_chars.into();
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Check the settings for values no pipeline can be built from.
    ///
    /// Class syntax itself is checked when the regular expressions are
    /// compiled.
    pub fn validate(&self) -> Result<()> {
        if self.word_chars.is_empty() {
            return Err(BugprepError::config("word_chars must not be empty"));
        }
        for (name, class) in [
            ("word_chars", &self.word_chars),
            ("split_chars", &self.split_chars),
            ("inter_chars", &self.inter_chars),
        ] {
            if has_unescaped_bracket(class) {
                return Err(BugprepError::config(format!(
                    "{name} must be a character class body without unescaped brackets: {class}"
                )));
            }
        }
        Ok(())
    }
}

fn has_unescaped_bracket(class: &str) -> bool {
    let mut escaped = false;
    for c in class.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' | ']' => return true,
            _ => {}
        }
    }
    false
}
