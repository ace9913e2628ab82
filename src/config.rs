//! Run configuration.
//!
//! A [`Config`] gathers everything fixed for the duration of a run: the
//! pipeline settings, the ignore-term sources and the batch settings. It is
//! loaded from a JSON file where every section and field is optional.
//!
//! ```json
//! {
//!   "analysis": { "word_chars": "a-zA-Z0-9$", "min_length": 3 },
//!   "ignore": { "files": ["stop-words.txt", "java-keywords.txt"] },
//!   "batch": { "batch_size": 500, "skip_invalid": true }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::preprocessor::Preprocessor;
use crate::analysis::config::PreprocessorConfig;
use crate::analysis::token_filter::ignore::IgnoreSet;
use crate::document::jsonl::BatchConfig;
use crate::error::{BugprepError, Result};

/// Where the ignore terms come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Newline-delimited term files. Empty selects the built-in lists.
    pub files: Vec<PathBuf>,
}

impl IgnoreConfig {
    /// Build the ignore set. Any unreadable file is an error.
    pub fn load(&self) -> Result<IgnoreSet> {
        if self.files.is_empty() {
            let set = IgnoreSet::builtin();
            info!("Using {} built-in ignore terms", set.len());
            Ok(set)
        } else {
            IgnoreSet::from_files(&self.files)
        }
    }
}

/// Complete configuration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: PreprocessorConfig,
    pub ignore: IgnoreConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| BugprepError::file(path, e))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            BugprepError::config(format!("Invalid configuration file {}: {e}", path.display()))
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.batch.validate()
    }

    pub fn ignore_set(&self) -> Result<IgnoreSet> {
        self.ignore.load()
    }

    /// Validate the configuration, load the ignore terms and build the
    /// pipeline.
    pub fn build_preprocessor(&self) -> Result<Preprocessor> {
        self.validate()?;
        let ignore = Arc::new(self.ignore_set()?);
        Preprocessor::new(self.analysis.clone(), ignore)
    }
}
