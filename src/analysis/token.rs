//! Token types for text analysis.
//!
//! A [`Token`] is the raw candidate word-unit extracted from input text by a
//! tokenizer. Tokens have no identity beyond their content and offsets; they
//! are created and discarded per call.
//!
//! # Examples
//!
//! ```
//! use bugprep::analysis::token::Token;
//!
//! let token = Token::with_offsets("getUserId", 1, 4, 13);
//! assert_eq!(token.text, "getUserId");
//! assert_eq!(token.char_len(), 9);
//! ```

/// A single token extracted from text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token, case preserved
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A stream of tokens produced by a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
