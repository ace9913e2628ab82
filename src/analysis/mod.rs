//! Text analysis for bug reports and source code.
//!
//! This module provides tokenization, token validation, identifier
//! splitting, stemming, and the [`Preprocessor`] that composes them.

pub mod analyzer;
pub mod config;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, Preprocessor};
pub use config::PreprocessorConfig;
pub use token::{Token, TokenStream};
pub use token_filter::{IgnoreSet, IdentifierSplitter, PorterStemmer, Stemmer, TokenValidator};
pub use tokenizer::{RegexTokenizer, Tokenizer};
