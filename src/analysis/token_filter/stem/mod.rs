//! Stemming algorithms.

/// Trait for stemming algorithms.
///
/// The trait requires `Send + Sync` so one stemmer can be shared by the
/// worker threads of a batch run.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod porter;

pub use porter::PorterStemmer;
