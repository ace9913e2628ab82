//! Identifier splitting.
//!
//! Compound identifiers (`camelCase`, `snake_case`, `Outer$Inner`,
//! `well-known`) are first transliterated to lowercase underscore form by
//! [`underscore`], then split on the configured split characters.
//!
//! # Examples
//!
//! ```
//! use bugprep::analysis::token_filter::split::{underscore, IdentifierSplitter};
//!
//! assert_eq!(underscore("parseHTTPResponse"), "parse_http_response");
//!
//! let splitter = IdentifierSplitter::new(r"_$\-").unwrap();
//! assert_eq!(splitter.split("getUserId"), vec!["get", "user", "id"]);
//! ```

use regex::Regex;

use crate::error::{BugprepError, Result};

/// Transliterate a camelCase identifier to lowercase underscore form.
///
/// Boundaries, using ASCII case classes and Unicode digits:
///
/// 1. an uppercase letter between an uppercase and a lowercase letter
///    starts a segment (`HTTPResponse` -> `HTTP_Response`);
/// 2. an uppercase letter after a lowercase letter or a digit starts a
///    segment (`fooBar` -> `foo_Bar`, `utf8Decoder` -> `utf8_Decoder`);
/// 3. `-` becomes `_`, and the result is lowercased.
///
/// A letter followed by a digit is not a boundary: `fooBarBAZ2` becomes
/// `foo_bar_baz2`.
pub fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();

    let mut acronyms_split: Vec<char> = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0
            && c.is_ascii_uppercase()
            && chars[i - 1].is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_lowercase())
        {
            acronyms_split.push('_');
        }
        acronyms_split.push(c);
    }

    let mut result = String::with_capacity(acronyms_split.len() + 4);
    for (i, &c) in acronyms_split.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = acronyms_split[i - 1];
            if prev.is_ascii_lowercase() || prev.is_numeric() {
                result.push('_');
            }
        }
        result.push(if c == '-' { '_' } else { c });
    }

    result.to_lowercase()
}

/// Splits compound identifiers into lowercase sub-words.
#[derive(Clone, Debug)]
pub struct IdentifierSplitter {
    /// `None` when no split characters are configured.
    separators: Option<Regex>,
}

impl IdentifierSplitter {
    /// Create a splitter for the given split character-class body.
    pub fn new(split_chars: &str) -> Result<Self> {
        let separators = if split_chars.is_empty() {
            None
        } else {
            let regex = Regex::new(&format!("[{split_chars}]")).map_err(|e| {
                BugprepError::analysis(format!("Invalid split characters {split_chars:?}: {e}"))
            })?;
            Some(regex)
        };

        Ok(IdentifierSplitter { separators })
    }

    /// Split a token into its non-empty fragments, left to right.
    ///
    /// A token that does not split comes back as a single fragment; callers
    /// decide whether one fragment is worth keeping.
    pub fn split(&self, token: &str) -> Vec<String> {
        let transliterated = underscore(token);
        match &self.separators {
            Some(separators) => separators
                .split(&transliterated)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string)
                .collect(),
            None if transliterated.is_empty() => Vec::new(),
            None => vec![transliterated],
        }
    }
}
