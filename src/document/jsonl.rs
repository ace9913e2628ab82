//! Parallel JSONL batch processing.
//!
//! Records are read one per line, collected into batches, normalized
//! concurrently on a dedicated rayon pool and written back in input order.
//! The output does not depend on the batch size or the thread count.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use bugprep::analysis::analyzer::preprocessor::Preprocessor;
//! use bugprep::analysis::config::PreprocessorConfig;
//! use bugprep::analysis::token_filter::ignore::IgnoreSet;
//! use bugprep::document::jsonl::{BatchConfig, JsonlProcessor};
//! use bugprep::document::record::{RecordKind, RecordNormalizer};
//!
//! let preprocessor = Preprocessor::new(PreprocessorConfig::default(), Arc::new(IgnoreSet::new())).unwrap();
//! let normalizer = RecordNormalizer::new(Arc::new(preprocessor), RecordKind::SourceText);
//! let processor = JsonlProcessor::new(normalizer, BatchConfig::default()).unwrap();
//!
//! let input = "{\"file\":\"A.java\",\"text\":\"class FooBar\"}\n";
//! let mut output = Vec::new();
//! let summary = processor.process(input.as_bytes(), &mut output).unwrap();
//!
//! assert_eq!(summary.records_written, 1);
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "{\"file\":\"A.java\",\"text\":\"class foobar foo bar\"}\n"
//! );
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::document::record::{NormalizedRecord, RecordNormalizer};
use crate::error::{BugprepError, Result};

/// Default number of records per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Settings for batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Records normalized per parallel batch.
    pub batch_size: usize,

    /// Worker threads; `None` uses one per CPU.
    pub thread_pool_size: Option<usize>,

    /// Log and skip invalid records instead of aborting the run.
    pub skip_invalid: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            thread_pool_size: None,
            skip_invalid: false,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(BugprepError::config("batch_size must be greater than zero"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(BugprepError::config(
                "thread_pool_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Counters for a finished batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Non-blank input lines.
    pub records_read: usize,

    /// Records written to the output.
    pub records_written: usize,

    /// Invalid records skipped.
    pub records_skipped: usize,

    /// Whitespace-only lines ignored.
    pub blank_lines: usize,

    /// Stems across all written records.
    pub stems_emitted: usize,

    /// Wall-clock time of the run.
    pub duration_ms: u64,
}

/// Line-oriented driver normalizing JSONL streams in parallel.
pub struct JsonlProcessor {
    normalizer: Arc<RecordNormalizer>,
    config: BatchConfig,
    thread_pool: Arc<ThreadPool>,
}

impl JsonlProcessor {
    /// Create a processor with its own thread pool.
    pub fn new(normalizer: RecordNormalizer, config: BatchConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("bugprep-worker-{i}"))
            .build()
            .map_err(|e| BugprepError::internal(format!("Failed to create thread pool: {e}")))?;

        debug!(
            "JSONL processor using {thread_pool_size} threads and batches of {}",
            config.batch_size
        );

        Ok(JsonlProcessor {
            normalizer: Arc::new(normalizer),
            config,
            thread_pool: Arc::new(thread_pool),
        })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &RecordNormalizer {
        &self.normalizer
    }

    /// Normalize every record of `reader`, writing one record per line to
    /// `writer`.
    ///
    /// Lines that are not valid UTF-8 are invalid records. Without
    /// `skip_invalid`, the first invalid record aborts the run; records
    /// before it have already been written at that point.
    pub fn process<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<BatchSummary> {
        let start = Instant::now();
        let mut summary = BatchSummary::default();
        let mut batch: Vec<(usize, String)> = Vec::with_capacity(self.config.batch_size);

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let line_no = index + 1;
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    summary.records_read += 1;
                    let error = BugprepError::record(
                        line_no,
                        format!("invalid UTF-8: {}", e.utf8_error()),
                    );
                    if self.config.skip_invalid {
                        warn!("Skipping record: {error}");
                        summary.records_skipped += 1;
                        continue;
                    }
                    self.process_batch(&mut batch, &mut writer, &mut summary)?;
                    writer.flush()?;
                    return Err(error);
                }
            };
            if line.trim().is_empty() {
                summary.blank_lines += 1;
                continue;
            }

            summary.records_read += 1;
            batch.push((line_no, line));

            if batch.len() >= self.config.batch_size {
                self.process_batch(&mut batch, &mut writer, &mut summary)?;
            }
        }

        if !batch.is_empty() {
            self.process_batch(&mut batch, &mut writer, &mut summary)?;
        }
        writer.flush()?;

        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Normalized {} of {} records ({} skipped, {} stems) in {} ms",
            summary.records_written,
            summary.records_read,
            summary.records_skipped,
            summary.stems_emitted,
            summary.duration_ms
        );

        Ok(summary)
    }

    fn process_batch<W: Write>(
        &self,
        batch: &mut Vec<(usize, String)>,
        writer: &mut W,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        let normalizer = &self.normalizer;
        let results: Vec<Result<NormalizedRecord>> = self.thread_pool.install(|| {
            batch
                .par_iter()
                .map(|(line_no, line)| normalizer.normalize_line(*line_no, line))
                .collect()
        });
        debug!("Normalized batch of {} records", batch.len());
        batch.clear();

        for result in results {
            match result {
                Ok(record) => {
                    writeln!(writer, "{}", record.json)?;
                    summary.records_written += 1;
                    summary.stems_emitted += record.stems;
                }
                Err(e) if self.config.skip_invalid => {
                    warn!("Skipping record: {e}");
                    summary.records_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for JsonlProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlProcessor")
            .field("fields", &self.normalizer.fields())
            .field("config", &self.config)
            .field("threads", &self.thread_pool.current_num_threads())
            .finish()
    }
}
