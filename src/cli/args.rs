//! Command line argument parsing for the bugprep CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// bugprep - Normalize bug reports and source code into stemmed token sequences
#[derive(Parser, Debug, Clone)]
#[command(name = "bugprep")]
#[command(about = "Normalize bug reports and source code into stemmed token sequences")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BugprepArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE", env = "BUGPREP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore-term file, replaces the built-in lists (repeatable)
    #[arg(long = "ignore-file", value_name = "FILE", global = true)]
    pub ignore_files: Vec<PathBuf>,

    /// Minimum token length
    #[arg(long, global = true)]
    pub min_length: Option<usize>,

    /// Token character class body, e.g. 'a-zA-Z0-9$'
    #[arg(long, value_name = "CLASS", global = true)]
    pub word_chars: Option<String>,

    /// Identifier split character class body
    #[arg(long, value_name = "CLASS", global = true)]
    pub split_chars: Option<String>,

    /// Token joining character class body
    #[arg(long, value_name = "CLASS", global = true)]
    pub inter_chars: Option<String>,

    /// Output format for reports
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BugprepArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=info, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Normalize the title and description of bug report records (JSONL)
    #[command(name = "bug-reports")]
    BugReports(BatchArgs),

    /// Normalize the text of source file records (JSONL)
    #[command(name = "source-texts")]
    SourceTexts(BatchArgs),

    /// Normalize literal strings
    Normalize(NormalizeArgs),

    /// Print the effective configuration
    #[command(name = "show-config")]
    ShowConfig,
}

/// Arguments for batch commands
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input JSONL file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output JSONL file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Records per parallel batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Skip invalid records instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Fields to normalize instead of the record kind's defaults (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

/// Arguments for normalizing literal strings
#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    /// Strings to normalize, in order
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bug_reports_command() {
        let args = BugprepArgs::try_parse_from([
            "bugprep",
            "bug-reports",
            "--input",
            "reports.jsonl",
            "--batch-size",
            "50",
            "--threads",
            "4",
            "--skip-invalid",
        ])
        .unwrap();

        if let Command::BugReports(batch) = args.command {
            assert_eq!(batch.input, Some(PathBuf::from("reports.jsonl")));
            assert_eq!(batch.output, None);
            assert_eq!(batch.batch_size, Some(50));
            assert_eq!(batch.threads, Some(4));
            assert!(batch.skip_invalid);
            assert!(batch.fields.is_empty());
        } else {
            panic!("Expected BugReports command");
        }
    }

    #[test]
    fn test_source_texts_fields() {
        let args = BugprepArgs::try_parse_from([
            "bugprep",
            "source-texts",
            "--fields",
            "text,comments",
        ])
        .unwrap();

        if let Command::SourceTexts(batch) = args.command {
            assert_eq!(batch.fields, vec!["text", "comments"]);
        } else {
            panic!("Expected SourceTexts command");
        }
    }

    #[test]
    fn test_normalize_command() {
        let args = BugprepArgs::try_parse_from([
            "bugprep",
            "normalize",
            "getUserId returns null",
            "second",
        ])
        .unwrap();

        if let Command::Normalize(normalize) = args.command {
            assert_eq!(normalize.texts.len(), 2);
        } else {
            panic!("Expected Normalize command");
        }

        assert!(BugprepArgs::try_parse_from(["bugprep", "normalize"]).is_err());
    }

    #[test]
    fn test_global_overrides() {
        let args = BugprepArgs::try_parse_from([
            "bugprep",
            "show-config",
            "--min-length",
            "4",
            "--word-chars",
            "a-zA-Z0-9$",
            "--ignore-file",
            "stop.txt",
            "--ignore-file",
            "keywords.txt",
        ])
        .unwrap();

        assert!(matches!(args.command, Command::ShowConfig));
        assert_eq!(args.min_length, Some(4));
        assert_eq!(args.word_chars.as_deref(), Some("a-zA-Z0-9$"));
        assert_eq!(args.ignore_files.len(), 2);
    }

    #[test]
    fn test_verbosity_levels() {
        let args = BugprepArgs::try_parse_from(["bugprep", "show-config"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = BugprepArgs::try_parse_from(["bugprep", "-v", "show-config"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = BugprepArgs::try_parse_from(["bugprep", "-vv", "show-config"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = BugprepArgs::try_parse_from(["bugprep", "-vv", "--quiet", "show-config"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            BugprepArgs::try_parse_from(["bugprep", "--format", "json", "show-config"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
