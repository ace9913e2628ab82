//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first stage of the normalization pipeline: they break
//! raw bug-report or source text into coarse word-like units.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Regex-based extraction of identifier-like tokens
//!
//! # Examples
//!
//! ```
//! use bugprep::analysis::tokenizer::Tokenizer;
//! use bugprep::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::for_identifiers(r"\w$", "'").unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("don't call getUserId()").collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "don't");
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared by the
/// worker threads of a batch run.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    ///
    /// Tokenization is total: any string, including the empty string,
    /// yields a (possibly empty) stream.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use self::regex::RegexTokenizer;
