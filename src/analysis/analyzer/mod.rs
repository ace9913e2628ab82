//! Analyzers that combine a tokenizer with the token filters.
//!
//! ```text
//! Raw Text -> Tokenizer -> Validity -> Splitter -> Stemmer -> Validity -> Stems
//! ```

use crate::analysis::token::TokenStream;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analysis is total: any string, including the empty one, produces a
/// (possibly empty) stream. The trait requires `Send + Sync` so one analyzer
/// can serve every worker thread of a batch run.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> TokenStream;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod preprocessor;

pub use preprocessor::Preprocessor;
