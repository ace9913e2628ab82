//! The text normalization pipeline for bug reports and source code.
//!
//! For every token extracted from the input:
//!
//! 1. the token is dropped unless it is valid;
//! 2. the lowercased token becomes the first candidate, and when the
//!    identifier splitter yields more than one fragment the valid fragments
//!    follow it;
//! 3. every candidate is stemmed and stripped of leading and trailing split
//!    or inter characters;
//! 4. stems that are still valid are emitted.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use bugprep::analysis::analyzer::preprocessor::Preprocessor;
//! use bugprep::analysis::config::PreprocessorConfig;
//! use bugprep::analysis::token_filter::ignore::IgnoreSet;
//!
//! let config = PreprocessorConfig::default().with_word_chars("a-zA-Z0-9$").with_inter_chars("'");
//! let ignore = Arc::new(IgnoreSet::from_terms(["the", "is"]));
//! let preprocessor = Preprocessor::new(config, ignore).unwrap();
//!
//! assert_eq!(
//!     preprocessor.preprocess("The getUserId() method returns null"),
//!     vec!["getuserid", "get", "user", "method", "return", "null"],
//! );
//! ```

use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::config::PreprocessorConfig;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::ignore::IgnoreSet;
use crate::analysis::token_filter::split::IdentifierSplitter;
use crate::analysis::token_filter::stem::{PorterStemmer, Stemmer};
use crate::analysis::token_filter::validity::TokenValidator;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::{BugprepError, Result};

/// Tokenizer, validator, splitter and stemmer composed into one transform.
///
/// Immutable after construction; share it behind an `Arc` across threads.
#[derive(Clone)]
pub struct Preprocessor {
    config: PreprocessorConfig,
    tokenizer: Arc<dyn Tokenizer>,
    validator: TokenValidator,
    splitter: IdentifierSplitter,
    stemmer: Arc<dyn Stemmer>,
    /// Leading or trailing runs of split/inter characters; `None` when both
    /// classes are empty.
    edge_delimiters: Option<Regex>,
}

impl Preprocessor {
    /// Build the pipeline for a configuration and ignore set.
    pub fn new(config: PreprocessorConfig, ignore: Arc<IgnoreSet>) -> Result<Self> {
        config.validate()?;

        let tokenizer = RegexTokenizer::for_identifiers(&config.word_chars, &config.inter_chars)?;
        let splitter = IdentifierSplitter::new(&config.split_chars)?;
        let edge_delimiters = edge_pattern(&config.split_chars, &config.inter_chars)
            .map(|pattern| {
                Regex::new(&pattern).map_err(|e| {
                    BugprepError::analysis(format!("Invalid delimiter characters: {e}"))
                })
            })
            .transpose()?;

        debug!(
            "Preprocessor built with token pattern {} and {} ignore terms",
            tokenizer.pattern(),
            ignore.len()
        );

        Ok(Preprocessor {
            validator: TokenValidator::new(config.min_length, ignore),
            tokenizer: Arc::new(tokenizer),
            splitter,
            stemmer: Arc::new(PorterStemmer::new()),
            edge_delimiters,
            config,
        })
    }

    /// Replace the stemmer.
    pub fn with_stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stemmer = stemmer;
        self
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    pub fn ignore(&self) -> &IgnoreSet {
        self.validator.ignore()
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }

    /// Normalize one string into its stem sequence.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        self.preprocess_all([Some(text)])
    }

    /// Normalize several strings into one flat stem sequence.
    ///
    /// Absent and empty strings contribute nothing. Stems keep the order of
    /// the strings they came from.
    pub fn preprocess_all<'a, I>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut stems = Vec::new();
        for text in texts.into_iter().flatten() {
            self.stem_into(text, &mut stems);
        }
        stems.into_iter().map(|token| token.text).collect()
    }

    /// Normalize an optional string into space-joined stems.
    pub fn normalize(&self, text: Option<&str>) -> String {
        self.preprocess_all([text]).join(" ")
    }

    /// Run the pipeline over `text`, appending stems to `out`.
    ///
    /// Each stem carries the offsets of the source token it came from and
    /// its position in `out`.
    fn stem_into(&self, text: &str, out: &mut Vec<Token>) {
        if text.is_empty() {
            return;
        }

        for token in self.tokenizer.tokenize(text) {
            if !self.validator.is_valid(&token.text) {
                continue;
            }

            let mut candidates = vec![token.text.to_lowercase()];
            let fragments = self.splitter.split(&token.text);
            if fragments.len() > 1 {
                candidates.extend(
                    fragments
                        .into_iter()
                        .filter(|fragment| self.validator.is_valid(fragment)),
                );
            }

            for candidate in candidates {
                let stem = self.trim_edges(self.stemmer.stem(&candidate));
                if self.validator.is_valid(&stem) {
                    let position = out.len();
                    out.push(Token::with_offsets(
                        stem,
                        position,
                        token.start_offset,
                        token.end_offset,
                    ));
                }
            }
        }
    }

    fn trim_edges(&self, stem: String) -> String {
        match &self.edge_delimiters {
            Some(edges) => edges.replace_all(&stem, "").into_owned(),
            None => stem,
        }
    }
}

impl Analyzer for Preprocessor {
    fn analyze(&self, text: &str) -> TokenStream {
        let mut stems = Vec::new();
        self.stem_into(text, &mut stems);
        Box::new(stems.into_iter())
    }

    fn name(&self) -> &'static str {
        "preprocessor"
    }
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .field("stemmer", &self.stemmer.name())
            .field("ignore_terms", &self.ignore().len())
            .finish()
    }
}

/// Pattern matching delimiter runs at either edge of a stem.
fn edge_pattern(split_chars: &str, inter_chars: &str) -> Option<String> {
    let classes: Vec<String> = [split_chars, inter_chars]
        .into_iter()
        .filter(|class| !class.is_empty())
        .map(|class| format!("[{class}]"))
        .collect();
    if classes.is_empty() {
        return None;
    }
    let run = format!("(?:{})+", classes.join("|"));
    Some(format!("^{run}|{run}$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocessor(config: PreprocessorConfig, ignore: &[&str]) -> Preprocessor {
        Preprocessor::new(config, Arc::new(IgnoreSet::from_terms(ignore))).unwrap()
    }

    fn scenario_preprocessor() -> Preprocessor {
        let config = PreprocessorConfig::default()
            .with_word_chars("a-zA-Z0-9$")
            .with_inter_chars("'")
            .with_min_length(3);
        preprocessor(config, &["the", "is"])
    }

    #[test]
    fn test_bug_report_sentence() {
        let p = scenario_preprocessor();
        assert_eq!(
            p.preprocess("The getUserId() method returns null"),
            vec!["getuserid", "get", "user", "method", "return", "null"]
        );
    }

    #[test]
    fn test_empty_and_absent_input() {
        let p = scenario_preprocessor();
        assert!(p.preprocess("").is_empty());
        assert!(p.preprocess_all([None, Some("")]).is_empty());
        assert_eq!(p.normalize(None), "");
        assert!(p.preprocess("  ... () !!").is_empty());
    }

    #[test]
    fn test_identifier_is_split_and_kept_whole() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        assert_eq!(
            p.preprocess("fooBarBaz"),
            vec!["foobarbaz", "foo", "bar", "baz"]
        );
    }

    #[test]
    fn test_split_gating_counts_raw_fragments() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        // "id" is too short, but two fragments were produced.
        assert_eq!(p.preprocess("getId"), vec!["getid", "get"]);
        // A token that does not split is not duplicated.
        assert_eq!(p.preprocess("method"), vec!["method"]);
    }

    #[test]
    fn test_ignored_whole_token_is_not_split() {
        let p = preprocessor(PreprocessorConfig::default(), &["forgetit"]);
        assert!(p.preprocess("forgetIt").is_empty());
    }

    #[test]
    fn test_ignored_fragment_is_dropped() {
        let p = preprocessor(PreprocessorConfig::default(), &["user"]);
        assert_eq!(
            p.preprocess("getUserName"),
            vec!["getusernam", "get", "name"]
        );
    }

    #[test]
    fn test_numeric_tokens() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        assert!(p.preprocess("abc123 0x1F 2024 v2").is_empty());
        assert_eq!(p.preprocess("abcd12"), vec!["abcd12"]);
    }

    #[test]
    fn test_short_tokens_never_appear() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        let stems = p.preprocess("a an it of to be x y z");
        assert!(stems.is_empty());
    }

    #[test]
    fn test_edge_delimiters_are_trimmed() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        assert_eq!(p.preprocess("$foo$"), vec!["foo"]);
        assert_eq!(p.preprocess("__init__"), vec!["init"]);
    }

    #[test]
    fn test_inter_chars_join_tokens() {
        let p = preprocessor(PreprocessorConfig::default(), &[]);
        assert_eq!(p.preprocess("don't"), vec!["don't"]);
        assert_eq!(
            p.preprocess("well-known"),
            vec!["well-known", "well", "known"]
        );
    }

    #[test]
    fn test_no_delimiter_classes() {
        let config = PreprocessorConfig::default()
            .with_split_chars("")
            .with_inter_chars("");
        let p = preprocessor(config, &[]);
        assert_eq!(p.preprocess("getUserId well-known"), vec!["getuserid", "well", "known"]);
    }

    #[test]
    fn test_strings_concatenate_in_order() {
        let p = scenario_preprocessor();
        let title = "NullPointerException in parser";
        let description = "The parser crashes on empty input";

        let mut separate = p.preprocess(title);
        separate.extend(p.preprocess(description));

        assert_eq!(p.preprocess_all([Some(title), Some(description)]), separate);
        assert_eq!(
            p.normalize(Some(title)),
            p.preprocess(title).join(" ")
        );
    }

    #[test]
    fn test_deterministic() {
        let p = scenario_preprocessor();
        let text = "Closing the HTTPConnection leaks file descriptors in SocketPool";
        assert_eq!(p.preprocess(text), p.preprocess(text));
    }

    #[test]
    fn test_every_stem_is_valid() {
        let p = preprocessor(PreprocessorConfig::default(), &["the", "and"]);
        let text = "The XMLParser_v2 and readBytes(0xFF) throw IOException's at line 42";
        for stem in p.preprocess(text) {
            assert!(p.validator().is_valid(&stem), "{stem} is not valid");
        }
    }

    #[test]
    fn test_stems_are_checked_again_after_stemming() {
        let p = preprocessor(PreprocessorConfig::default(), &["return"]);

        // Valid before stemming, ignored after.
        assert!(p.validator().is_valid("returns"));
        assert_eq!(p.stemmer().stem("returns"), "return");
        assert!(p.preprocess("returns").is_empty());

        // Valid before stemming, too short after.
        assert!(p.validator().is_valid("ties"));
        assert_eq!(p.stemmer().stem("ties"), "ti");
        assert!(p.preprocess("ties").is_empty());

        assert_eq!(p.preprocess("returns ties method"), vec!["method"]);
    }

    #[test]
    fn test_restemming_keeps_valid_stems() {
        let p = scenario_preprocessor();
        let text = "The parser crashes while reading configuration files after generalizations";
        let stems = p.preprocess(text);
        assert!(!stems.is_empty());

        for stem in stems {
            let restemmed = p.trim_edges(p.stemmer().stem(&stem));
            let again = p.preprocess(&stem);
            if p.validator().is_valid(&restemmed) {
                assert_eq!(again, vec![restemmed], "{stem} was dropped");
            } else {
                assert!(again.is_empty());
            }
        }

        assert_eq!(p.preprocess("generalizations"), vec!["gener"]);
        assert_eq!(p.preprocess("gener"), vec!["gener"]);
    }

    #[test]
    fn test_analyze_keeps_source_offsets() {
        let p = scenario_preprocessor();
        let tokens: Vec<Token> = p.analyze("The getUserId").collect();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.start_offset == 4 && t.end_offset == 13));
        assert_eq!(tokens[2].position, 2);
        assert_eq!(tokens[2].text, "user");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PreprocessorConfig::default().with_word_chars("");
        let result = Preprocessor::new(config, Arc::new(IgnoreSet::new()));
        assert!(result.is_err());

        let config = PreprocessorConfig::default().with_split_chars("z-a");
        assert!(Preprocessor::new(config, Arc::new(IgnoreSet::new())).is_err());
    }

    #[test]
    fn test_custom_stemmer() {
        struct Identity;
        impl Stemmer for Identity {
            fn stem(&self, word: &str) -> String {
                word.to_string()
            }
            fn name(&self) -> &'static str {
                "identity"
            }
        }

        let p = preprocessor(PreprocessorConfig::default(), &[]).with_stemmer(Arc::new(Identity));
        assert_eq!(p.preprocess("returns"), vec!["returns"]);
        assert_eq!(p.stemmer().name(), "identity");
    }
}
