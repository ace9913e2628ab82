//! Token validity checks.
//!
//! A token is valid when it is long enough, does not look like a number or
//! code, and is not an ignored term. The same predicate is applied before
//! splitting, to every split fragment, and to every stem.
//!
//! # Numeric heuristic
//!
//! Letters and digits of the token are counted:
//!
//! - fewer than `min_length` letters: numeric
//! - more letters than digits: not numeric
//! - otherwise (digits at least as many as letters): numeric
//!
//! This supersedes the older rule that only rejected tokens without any
//! letter. Ties are deliberately numeric: `abc123` is dropped, `abcd12` kept.

use std::sync::Arc;

use crate::analysis::token_filter::ignore::IgnoreSet;

/// Reason a token failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Shorter than the minimum length.
    TooShort,
    /// Classified as a number or code by the letter/digit heuristic.
    Numeric,
    /// Present in the ignore set.
    Ignored,
}

/// Validity predicate shared by every stage of the pipeline.
#[derive(Clone, Debug)]
pub struct TokenValidator {
    min_length: usize,
    ignore: Arc<IgnoreSet>,
}

impl TokenValidator {
    pub fn new(min_length: usize, ignore: Arc<IgnoreSet>) -> Self {
        TokenValidator { min_length, ignore }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Classify a token as numeric by its letter/digit counts.
    pub fn is_numeric(&self, token: &str) -> bool {
        let (letters, numbers) = token.chars().fold((0usize, 0usize), |(l, n), c| {
            if c.is_alphabetic() {
                (l + 1, n)
            } else if c.is_numeric() {
                (l, n + 1)
            } else {
                (l, n)
            }
        });

        if letters < self.min_length {
            true
        } else {
            letters <= numbers
        }
    }

    /// Return why a token is rejected, or `None` if it is valid.
    pub fn rejection(&self, token: &str) -> Option<Rejection> {
        if token.chars().count() < self.min_length {
            Some(Rejection::TooShort)
        } else if self.is_numeric(token) {
            Some(Rejection::Numeric)
        } else if self.ignore.contains(token) {
            Some(Rejection::Ignored)
        } else {
            None
        }
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.rejection(token).is_none()
    }
}
