//! Token filters applied after tokenization.
//!
//! Each stage decides what happens to a single token: [`validity`] accepts
//! or rejects it, [`split`] breaks compound identifiers into sub-words, and
//! [`stem`] reduces words to their stems. The [`ignore`] set is shared by
//! every validity check.

pub mod ignore;
pub mod split;
pub mod stem;
pub mod validity;

pub use ignore::IgnoreSet;
pub use split::{IdentifierSplitter, underscore};
pub use stem::{PorterStemmer, Stemmer};
pub use validity::{Rejection, TokenValidator};
