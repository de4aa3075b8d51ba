//! JSON-line filtering.
//!
//! Keeps records that parse as exactly one JSON value and silently drops the
//! rest, which turns a mixed log stream into clean NDJSON.

use std::io::Read;

use serde::de::IgnoredAny;

use super::filter::{FilterOutcome, LineFilter};
use super::reader::LineFilterReader;
use crate::close::ReadClose;

/// Emits records that are well-formed JSON, drops everything else.
///
/// Surrounding whitespace, including the record's own newline, is ignored
/// for validation but kept in the emitted text. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLineFilter;

impl LineFilter for JsonLineFilter {
    fn filter(&mut self, record: &str) -> FilterOutcome {
        if is_valid_json(record) {
            FilterOutcome::Emit(record.to_owned())
        } else {
            FilterOutcome::Drop
        }
    }
}

/// Whether `text` holds exactly one JSON value, whitespace aside.
pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(text).is_ok()
}

/// A [`ReadClose`] that yields only the JSON records of its source and
/// closes that same source.
pub type JsonFilterReadCloser<R> = LineFilterReader<R, JsonLineFilter>;

/// Wrap any reader so only its JSON lines come through.
pub const fn json_filter_reader<R: Read>(source: R) -> LineFilterReader<R, JsonLineFilter> {
    LineFilterReader::new(source, JsonLineFilter)
}

/// Wrap a closable source; closing the result closes `source`.
pub const fn json_filter_read_closer<R: ReadClose>(source: R) -> JsonFilterReadCloser<R> {
    LineFilterReader::new(source, JsonLineFilter)
}
