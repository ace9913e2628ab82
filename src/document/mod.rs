//! JSON record handling.
//!
//! - [`record`] - Normalizing the text fields of one JSON record
//! - [`jsonl`] - Parallel, order-preserving processing of JSONL streams

pub mod jsonl;
pub mod record;

pub use jsonl::{BatchConfig, BatchSummary, JsonlProcessor};
pub use record::{NormalizedRecord, RecordKind, RecordNormalizer};
