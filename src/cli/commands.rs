//! Command implementations for the bugprep CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::sync::Arc;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::Config;
use crate::document::jsonl::JsonlProcessor;
use crate::document::record::{RecordKind, RecordNormalizer};
use crate::error::{BugprepError, Result};

/// Execute a CLI command.
pub fn execute_command(args: BugprepArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    match &args.command {
        Command::BugReports(batch_args) => {
            run_batch(RecordKind::BugReport, batch_args, config, &args)
        }
        Command::SourceTexts(batch_args) => {
            run_batch(RecordKind::SourceText, batch_args, config, &args)
        }
        Command::Normalize(normalize_args) => normalize_texts(normalize_args, &config, &args),
        Command::ShowConfig => show_config(config, &args),
    }
}

/// Build the effective configuration: the `--config` file (or defaults)
/// with command line overrides applied.
pub fn resolve_config(args: &BugprepArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(min_length) = args.min_length {
        config.analysis.min_length = min_length;
    }
    if let Some(word_chars) = &args.word_chars {
        config.analysis.word_chars = word_chars.clone();
    }
    if let Some(split_chars) = &args.split_chars {
        config.analysis.split_chars = split_chars.clone();
    }
    if let Some(inter_chars) = &args.inter_chars {
        config.analysis.inter_chars = inter_chars.clone();
    }
    if !args.ignore_files.is_empty() {
        config.ignore.files = args.ignore_files.clone();
    }

    if let Command::BugReports(batch_args) | Command::SourceTexts(batch_args) = &args.command {
        if let Some(batch_size) = batch_args.batch_size {
            config.batch.batch_size = batch_size;
        }
        if let Some(threads) = batch_args.threads {
            config.batch.thread_pool_size = Some(threads);
        }
        if batch_args.skip_invalid {
            config.batch.skip_invalid = true;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Normalize a JSONL stream of records.
fn run_batch(
    kind: RecordKind,
    batch_args: &BatchArgs,
    config: Config,
    cli_args: &BugprepArgs,
) -> Result<()> {
    let preprocessor = Arc::new(config.build_preprocessor()?);
    let mut normalizer = RecordNormalizer::new(preprocessor, kind);
    if !batch_args.fields.is_empty() {
        normalizer = normalizer.with_fields(batch_args.fields.iter().cloned());
    }
    info!("Normalizing fields {:?}", normalizer.fields());

    let processor = JsonlProcessor::new(normalizer, config.batch)?;

    let reader: Box<dyn io::BufRead> = match &batch_args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|e| BugprepError::file(path, e))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &batch_args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| BugprepError::file(path, e))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let summary = processor.process(reader, writer)?;

    write_batch_summary(&mut io::stderr().lock(), &summary, cli_args)
}

/// Normalize literal strings as one sequence.
fn normalize_texts(args: &NormalizeArgs, config: &Config, cli_args: &BugprepArgs) -> Result<()> {
    let preprocessor = config.build_preprocessor()?;
    let stems = preprocessor.preprocess_all(args.texts.iter().map(|text| Some(text.as_str())));
    write_normalize_result(&mut io::stdout().lock(), &NormalizeResult { stems }, cli_args)
}

/// Print the effective configuration.
fn show_config(config: Config, cli_args: &BugprepArgs) -> Result<()> {
    let ignore_terms = config.ignore_set()?.len();
    let report = ConfigReport {
        config,
        ignore_terms,
    };
    write_config_report(&mut io::stdout().lock(), &report, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> BugprepArgs {
        BugprepArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve_config(&parse(&["bugprep", "show-config"])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_apply_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"analysis": {"min_length": 5, "inter_chars": "'"}, "batch": {"batch_size": 10}}"#,
        )
        .unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let config = resolve_config(&parse(&[
            "bugprep",
            "--config",
            path_arg.as_str(),
            "--min-length",
            "4",
            "--ignore-file",
            "stop.txt",
            "bug-reports",
            "--threads",
            "2",
            "--skip-invalid",
        ]))
        .unwrap();

        assert_eq!(config.analysis.min_length, 4);
        assert_eq!(config.analysis.inter_chars, "'");
        assert_eq!(config.ignore.files, vec![PathBuf::from("stop.txt")]);
        assert_eq!(config.batch.batch_size, 10);
        assert_eq!(config.batch.thread_pool_size, Some(2));
        assert!(config.batch.skip_invalid);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = parse(&["bugprep", "bug-reports", "--batch-size", "0"]);
        assert!(matches!(
            resolve_config(&args),
            Err(BugprepError::Config(_))
        ));
    }

    #[test]
    fn test_batch_files_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.jsonl");
        let output = dir.path().join("out.jsonl");
        let stop = dir.path().join("stop.txt");
        fs::write(&stop, "the\nis\n").unwrap();
        fs::write(
            &input,
            "{\"file\":\"A.java\",\"text\":\"The readLine method\"}\n",
        )
        .unwrap();

        let stop_arg = stop.to_string_lossy().into_owned();
        let input_arg = input.to_string_lossy().into_owned();
        let output_arg = output.to_string_lossy().into_owned();
        let args = parse(&[
            "bugprep",
            "-q",
            "--ignore-file",
            stop_arg.as_str(),
            "source-texts",
            "--input",
            input_arg.as_str(),
            "--output",
            output_arg.as_str(),
        ]);
        execute_command(args).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "{\"file\":\"A.java\",\"text\":\"readlin read line method\"}\n"
        );
    }

    #[test]
    fn test_missing_input_names_file() {
        let args = parse(&["bugprep", "-q", "bug-reports", "--input", "/nonexistent/in.jsonl"]);
        assert!(matches!(
            execute_command(args),
            Err(BugprepError::File { .. })
        ));
    }
}
