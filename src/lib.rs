//! # bugprep
//!
//! Text normalization for bug reports and source code.
//!
//! Raw text is tokenized, filtered, split into identifier sub-words and
//! stemmed, producing the token sequences that bug localization compares.
//!
//! ## Features
//!
//! - Configurable token, split and joining character classes
//! - Letter/digit heuristic that drops numbers, hex literals and codes
//! - camelCase, acronym and delimiter-aware identifier splitting
//! - Porter stemming
//! - Parallel, order-preserving JSONL batch processing
//!
//! ```
//! use bugprep::config::Config;
//!
//! let preprocessor = Config::default().build_preprocessor().unwrap();
//! assert_eq!(preprocessor.preprocess("parseHTTPResponse failed"), vec![
//!     "parsehttprespons", "pars", "http", "respons", "fail",
//! ]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;

pub mod prelude {
    pub use crate::analysis::{Analyzer, IgnoreSet, Preprocessor, PreprocessorConfig};
    pub use crate::config::Config;
    pub use crate::document::{BatchConfig, BatchSummary, JsonlProcessor, RecordKind, RecordNormalizer};
    pub use crate::error::{BugprepError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
