//! Normalization of individual JSON records.
//!
//! A record is one JSON object. The configured text fields are replaced by
//! their space-joined stems; every other field, and the key order, pass
//! through unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::analyzer::preprocessor::Preprocessor;
use crate::error::{BugprepError, Result};

/// The record shapes produced by upstream collectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// `{"key", "title", "description", "creation_date", "resolution_date", "fixed_files"}`
    BugReport,
    /// `{"file", "text"}`
    SourceText,
}

impl RecordKind {
    /// The fields normalized for this kind of record.
    pub fn text_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::BugReport => &["title", "description"],
            RecordKind::SourceText => &["text"],
        }
    }
}

/// A record after normalization.
///
/// Numbers keep their original digits, so integers beyond 64 bits survive
/// the round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// The record serialized as compact JSON.
    pub json: String,
    /// Number of stems written across all normalized fields.
    pub stems: usize,
}

/// Replaces the text fields of JSON records with their normalized form.
#[derive(Clone, Debug)]
pub struct RecordNormalizer {
    preprocessor: Arc<Preprocessor>,
    fields: Vec<String>,
}

impl RecordNormalizer {
    /// Create a normalizer for the text fields of `kind`.
    pub fn new(preprocessor: Arc<Preprocessor>, kind: RecordKind) -> Self {
        let fields = kind.text_fields().iter().map(|f| f.to_string()).collect();
        RecordNormalizer {
            preprocessor,
            fields,
        }
    }

    /// Normalize an explicit list of fields instead.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Normalize the configured fields of a JSON object in place.
    ///
    /// Returns the number of stems written. A `null` field becomes the
    /// empty string; a missing or non-string field is an error.
    pub fn normalize_object(&self, object: &mut Map<String, Value>) -> Result<usize> {
        let mut stems = 0;
        for field in &self.fields {
            let value = object.get_mut(field).ok_or_else(|| {
                BugprepError::invalid_record(format!("missing field \"{field}\""))
            })?;
            let text = match &*value {
                Value::Null => None,
                Value::String(text) => Some(text.as_str()),
                other => {
                    return Err(BugprepError::invalid_record(format!(
                        "field \"{field}\" must be a string or null, found {}",
                        type_name(other)
                    )));
                }
            };
            let normalized = self.preprocessor.preprocess_all([text]);
            stems += normalized.len();
            *value = Value::String(normalized.join(" "));
        }
        Ok(stems)
    }

    /// Normalize a JSON value, which must be an object.
    pub fn normalize_value(&self, value: &mut Value) -> Result<usize> {
        match value {
            Value::Object(object) => self.normalize_object(object),
            other => Err(BugprepError::invalid_record(format!(
                "expected a JSON object, found {}",
                type_name(other)
            ))),
        }
    }

    /// Parse, normalize and re-serialize one input line.
    ///
    /// Errors carry the 1-based `line_no`.
    pub fn normalize_line(&self, line_no: usize, line: &str) -> Result<NormalizedRecord> {
        let mut value: Value = serde_json::from_str(line)
            .map_err(|e| BugprepError::record(line_no, format!("malformed JSON: {e}")))?;
        let stems = self
            .normalize_value(&mut value)
            .map_err(|e| BugprepError::record(line_no, e.to_string()))?;
        let json = serde_json::to_string(&value)?;
        Ok(NormalizedRecord { json, stems })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::config::PreprocessorConfig;
    use crate::analysis::token_filter::ignore::IgnoreSet;

    fn normalizer(kind: RecordKind) -> RecordNormalizer {
        let config = PreprocessorConfig::default()
            .with_word_chars("a-zA-Z0-9$")
            .with_inter_chars("'");
        let ignore = Arc::new(IgnoreSet::from_terms(["the", "is"]));
        RecordNormalizer::new(Arc::new(Preprocessor::new(config, ignore).unwrap()), kind)
    }

    #[test]
    fn test_bug_report_fields_replaced_in_order() {
        let n = normalizer(RecordKind::BugReport);
        let line = r#"{"key":"BUG-1","title":"The getUserId() method returns null","description":null,"creation_date":null,"resolution_date":"2020-01-01","fixed_files":["a/B.java"]}"#;

        let record = n.normalize_line(1, line).unwrap();
        assert_eq!(
            record.json,
            r#"{"key":"BUG-1","title":"getuserid get user method return null","description":"","creation_date":null,"resolution_date":"2020-01-01","fixed_files":["a/B.java"]}"#
        );
        assert_eq!(record.stems, 6);
    }

    #[test]
    fn test_source_text_field() {
        let n = normalizer(RecordKind::SourceText);
        let record = n
            .normalize_line(3, r#"{"file":"src/Foo.java","text":"class FooBar"}"#)
            .unwrap();
        assert_eq!(
            record.json,
            r#"{"file":"src/Foo.java","text":"class foobar foo bar"}"#
        );
    }

    #[test]
    fn test_custom_fields() {
        let n = normalizer(RecordKind::BugReport).with_fields(["summary"]);
        assert_eq!(n.fields(), ["summary".to_string()]);
        let record = n
            .normalize_line(1, r#"{"summary":"Parsing failed","title":"Parsing failed"}"#)
            .unwrap();
        assert_eq!(
            record.json,
            r#"{"summary":"pars fail","title":"Parsing failed"}"#
        );
    }

    #[test]
    fn test_missing_field_is_error() {
        let n = normalizer(RecordKind::BugReport);
        let err = n.normalize_line(7, r#"{"title":"x"}"#).unwrap_err();
        match err {
            BugprepError::Record { line, message } => {
                assert_eq!(line, 7);
                assert!(message.contains("description"));
            }
            other => panic!("Expected record error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_field_is_error() {
        let n = normalizer(RecordKind::SourceText);
        assert!(n.normalize_line(1, r#"{"text":42}"#).is_err());
    }

    #[test]
    fn test_non_object_and_malformed_lines() {
        let n = normalizer(RecordKind::SourceText);
        assert!(matches!(
            n.normalize_line(2, "[1,2]"),
            Err(BugprepError::Record { line: 2, .. })
        ));
        assert!(matches!(
            n.normalize_line(4, "{not json"),
            Err(BugprepError::Record { line: 4, .. })
        ));
    }

    #[test]
    fn test_other_fields_pass_through_verbatim() {
        let n = normalizer(RecordKind::SourceText);
        let line = r#"{"id":123456789012345678901234567890,"ratio":0.1000000000000000055511151231257827,"text":"run"}"#;
        let record = n.normalize_line(1, line).unwrap();
        assert_eq!(
            record.json,
            r#"{"id":123456789012345678901234567890,"ratio":0.1000000000000000055511151231257827,"text":"run"}"#
        );
    }

    #[test]
    fn test_text_fields() {
        assert_eq!(RecordKind::BugReport.text_fields(), ["title", "description"]);
        assert_eq!(RecordKind::SourceText.text_fields(), ["text"]);
    }
}
