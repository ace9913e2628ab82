//! Ignore-term set.
//!
//! Holds the stop words and language keywords excluded at every validity
//! check of the pipeline. The set is built once, before any processing, and
//! is read-only afterwards. Lookups are case-insensitive.
//!
//! # Examples
//!
//! ```
//! use bugprep::analysis::token_filter::ignore::IgnoreSet;
//!
//! let ignore = IgnoreSet::from_terms(vec!["The", "is", ""]);
//! assert_eq!(ignore.len(), 2);
//! assert!(ignore.contains("THE"));
//! assert!(!ignore.contains("method"));
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use ahash::AHashSet;
use log::info;

use crate::error::{BugprepError, Result};

/// Built-in English stop word list, one term per line.
pub const BUILTIN_STOP_WORDS: &str = include_str!("../../../data/stop-words.txt");

/// Built-in Java reserved words and literals, one term per line.
pub const BUILTIN_JAVA_KEYWORDS: &str = include_str!("../../../data/java-keywords.txt");

/// A case-insensitive, immutable set of terms to ignore.
#[derive(Clone, Debug, Default)]
pub struct IgnoreSet {
    terms: AHashSet<String>,
}

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an ignore set from a list of terms.
    ///
    /// Terms are trimmed and lowercased; blank terms contribute nothing.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend_terms(terms);
        set
    }

    /// Create the ignore set from the bundled stop-word and Java keyword lists.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.extend_from_list(BUILTIN_STOP_WORDS);
        set.extend_from_list(BUILTIN_JAVA_KEYWORDS);
        set
    }

    /// Create an ignore set by merging newline-delimited term files.
    ///
    /// A file that cannot be read is an error naming that file. Lines that
    /// are not valid UTF-8 are decoded lossily instead of failing the run.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut set = Self::new();
        for path in paths {
            let path = path.as_ref();
            let bytes = fs::read(path).map_err(|e| BugprepError::file(path, e))?;
            let before = set.len();
            set.extend_from_list(&String::from_utf8_lossy(&bytes));
            info!(
                "Loaded {} new ignore terms from {}",
                set.len() - before,
                path.display()
            );
        }
        Ok(set)
    }

    fn extend_from_list(&mut self, list: &str) {
        self.extend_terms(list.lines());
    }

    fn extend_terms<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            let term = term.as_ref().trim();
            if !term.is_empty() {
                self.terms.insert(term.to_lowercase());
            }
        }
    }

    /// Check whether a term is ignored, regardless of its case.
    pub fn contains(&self, term: &str) -> bool {
        let lowered = if term.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
            Cow::Owned(term.to_lowercase())
        } else {
            Cow::Borrowed(term)
        };
        self.terms.contains(lowered.as_ref())
    }

    /// Get the number of ignored terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
