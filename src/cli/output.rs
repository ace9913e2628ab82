//! Output formatting for CLI commands.
//!
//! Normalized records always go to the record output; reports (run
//! summaries, effective configuration, normalized strings) are rendered
//! here as human text or JSON.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{BugprepArgs, OutputFormat};
use crate::config::Config;
use crate::document::jsonl::BatchSummary;
use crate::error::Result;

/// Result of the `normalize` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub stems: Vec<String>,
}

/// Effective configuration report of the `show-config` command.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    #[serde(flatten)]
    pub config: Config,
    pub ignore_terms: usize,
}

/// Render a report as JSON, honoring `--pretty`.
pub fn to_json<T: Serialize>(result: &T, args: &BugprepArgs) -> Result<String> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Write normalized strings.
pub fn write_normalize_result<W: Write>(
    out: &mut W,
    result: &NormalizeResult,
    args: &BugprepArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => writeln!(out, "{}", result.stems.join(" "))?,
        OutputFormat::Json => writeln!(out, "{}", to_json(result, args)?)?,
    }
    Ok(())
}

/// Write the effective configuration.
pub fn write_config_report<W: Write>(
    out: &mut W,
    report: &ConfigReport,
    args: &BugprepArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            let analysis = &report.config.analysis;
            let batch = &report.config.batch;
            writeln!(out, "Analysis:")?;
            writeln!(out, "  word_chars:  {}", analysis.word_chars)?;
            writeln!(out, "  split_chars: {}", analysis.split_chars)?;
            writeln!(out, "  inter_chars: {}", analysis.inter_chars)?;
            writeln!(out, "  min_length:  {}", analysis.min_length)?;
            writeln!(out, "Ignore:")?;
            if report.config.ignore.files.is_empty() {
                writeln!(out, "  files:       (built-in)")?;
            } else {
                for file in &report.config.ignore.files {
                    writeln!(out, "  file:        {}", file.display())?;
                }
            }
            writeln!(out, "  terms:       {}", report.ignore_terms)?;
            writeln!(out, "Batch:")?;
            writeln!(out, "  batch_size:  {}", batch.batch_size)?;
            match batch.thread_pool_size {
                Some(threads) => writeln!(out, "  threads:     {threads}")?,
                None => writeln!(out, "  threads:     {} (all CPUs)", num_cpus::get())?,
            }
            writeln!(out, "  skip_invalid: {}", batch.skip_invalid)?;
        }
        OutputFormat::Json => writeln!(out, "{}", to_json(report, args)?)?,
    }
    Ok(())
}

/// Write a batch run summary.
///
/// Human summaries are only written when verbosity is above normal.
pub fn write_batch_summary<W: Write>(
    out: &mut W,
    summary: &BatchSummary,
    args: &BugprepArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => writeln!(out, "{}", to_json(summary, args)?)?,
        OutputFormat::Human if args.verbosity() > 1 => {
            writeln!(out, "Records read:    {}", summary.records_read)?;
            writeln!(out, "Records written: {}", summary.records_written)?;
            writeln!(out, "Records skipped: {}", summary.records_skipped)?;
            writeln!(out, "Blank lines:     {}", summary.blank_lines)?;
            writeln!(out, "Stems emitted:   {}", summary.stems_emitted)?;
            writeln!(out, "Duration:        {} ms", summary.duration_ms)?;
        }
        OutputFormat::Human => {}
    }
    Ok(())
}
