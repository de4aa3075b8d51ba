//! Record filters.
//!
//! A filter sees one record's text (trailing newline included when the
//! source had one) and decides whether to emit it, replace it, drop it or
//! stop the stream.

use std::io;

/// What a filter decided for a single record.
#[derive(Debug)]
pub enum FilterOutcome {
    /// Deliver this text in place of the record. Empty text counts as
    /// [`FilterOutcome::Drop`]; an empty line can never be emitted.
    Emit(String),
    /// Discard the record and move on to the next one.
    Drop,
    /// Stop the stream; the error is handed to the reader's caller as is.
    Fail(io::Error),
}

impl FilterOutcome {
    /// Build a [`FilterOutcome::Fail`] from any error type.
    pub fn fail<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Fail(io::Error::other(err))
    }

    /// Map the classic `(text, error)` convention: an error fails, an empty
    /// string drops, anything else is emitted.
    pub fn from_result<E>(result: Result<String, E>) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match result {
            Ok(text) if text.is_empty() => Self::Drop,
            Ok(text) => Self::Emit(text),
            Err(e) => Self::fail(e),
        }
    }
}

/// Per-record transform applied by [`LineFilterReader`](super::LineFilterReader).
pub trait LineFilter {
    fn filter(&mut self, record: &str) -> FilterOutcome;
}

impl<F> LineFilter for F
where
    F: FnMut(&str) -> FilterOutcome,
{
    fn filter(&mut self, record: &str) -> FilterOutcome {
        self(record)
    }
}

/// Emits every record unchanged. Never drops, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl LineFilter for Identity {
    fn filter(&mut self, record: &str) -> FilterOutcome {
        FilterOutcome::Emit(record.to_owned())
    }
}

/// Runs the wrapped filter, or behaves as [`Identity`] when there is none.
#[derive(Debug, Clone, Default)]
pub struct OrIdentity<F>(pub Option<F>);

impl<F: LineFilter> LineFilter for OrIdentity<F> {
    fn filter(&mut self, record: &str) -> FilterOutcome {
        match &mut self.0 {
            Some(f) => f.filter(record),
            None => Identity.filter(record),
        }
    }
}

/// Adapts a `FnMut(&str) -> Result<String, E>` filter, where returning an
/// empty string drops the record.
#[derive(Debug, Clone)]
pub struct StringFilter<F>(pub F);

impl<F, E> LineFilter for StringFilter<F>
where
    F: FnMut(&str) -> Result<String, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn filter(&mut self, record: &str) -> FilterOutcome {
        FilterOutcome::from_result((self.0)(record))
    }
}
