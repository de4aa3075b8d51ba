//! The line-filtering reader.

use std::fmt;
use std::io::{self, Read};

use tracing::{debug, trace};

use super::filter::{FilterOutcome, Identity, LineFilter, OrIdentity};
use super::split::RecordSplitter;
use super::stats::ReaderStats;
use crate::close::Close;
use crate::config::{DEFAULT_MAX_RECORD_BYTES, DEFAULT_READ_CAPACITY, StreamConfig, Utf8Policy};
use crate::error::{Error, Result};

/// Where a [`LineFilterReader`] is in its lifecycle.
///
/// `Exhausted` and `Errored` are terminal: once reached, the source is never
/// read again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Nothing buffered; the next read pulls records.
    Idle,
    /// An accepted record is partially delivered.
    RecordReady,
    /// The source ended cleanly and everything was delivered.
    Exhausted,
    /// A filter or source error ended the stream.
    Errored,
}

enum State {
    Idle,
    RecordReady { record: Vec<u8>, pos: usize },
    Exhausted,
    Errored { kind: io::ErrorKind, cause: String },
}

/// Splits a byte source into newline records, runs each through a
/// [`LineFilter`] and serves the accepted records as a byte stream.
///
/// Records are pulled only when the previous accepted record has been fully
/// copied out, so at most one record is ever held. A single `read` call may
/// skip any number of dropped records.
///
/// The first read that hits a filter or source error returns that error
/// unchanged. Every read after that returns an error of the same
/// [`io::ErrorKind`] wrapping [`Error::Terminated`]; an `Interrupted` kind is
/// replayed as `Other`.
pub struct LineFilterReader<R, F = Identity> {
    records: RecordSplitter<R>,
    filter: F,
    invalid_utf8: Utf8Policy,
    state: State,
    stats: ReaderStats,
}

impl<R: Read, F: LineFilter> LineFilterReader<R, F> {
    pub const fn new(source: R, filter: F) -> Self {
        Self::build(
            source,
            filter,
            DEFAULT_READ_CAPACITY,
            DEFAULT_MAX_RECORD_BYTES,
            Utf8Policy::Reject,
        )
    }

    /// Build a reader with explicit limits. Fails if the config is invalid.
    pub fn with_config(source: R, filter: F, config: &StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(
            source,
            filter,
            config.read_capacity,
            config.max_record_bytes,
            config.invalid_utf8,
        ))
    }

    const fn build(
        source: R,
        filter: F,
        read_capacity: usize,
        max_record_bytes: usize,
        invalid_utf8: Utf8Policy,
    ) -> Self {
        Self {
            records: RecordSplitter::new(source, read_capacity, max_record_bytes),
            filter,
            invalid_utf8,
            state: State::Idle,
            stats: ReaderStats {
                records_read: 0,
                records_emitted: 0,
                records_dropped: 0,
                bytes_delivered: 0,
            },
        }
    }
}

impl<R: Read> LineFilterReader<R, Identity> {
    /// A reader that passes every record through unchanged.
    pub const fn identity(source: R) -> Self {
        Self::new(source, Identity)
    }
}

impl<R: Read, F: LineFilter> LineFilterReader<R, OrIdentity<F>> {
    /// Build from possibly-absent parts.
    ///
    /// A missing source is [`Error::NilReader`]; a missing filter means
    /// every record passes through.
    pub fn from_parts(source: Option<R>, filter: Option<F>) -> Result<Self> {
        let source = source.ok_or(Error::NilReader)?;
        Ok(Self::new(source, OrIdentity(filter)))
    }
}

impl<R, F> LineFilterReader<R, F> {
    pub const fn state(&self) -> ReaderState {
        match self.state {
            State::Idle => ReaderState::Idle,
            State::RecordReady { .. } => ReaderState::RecordReady,
            State::Exhausted => ReaderState::Exhausted,
            State::Errored { .. } => ReaderState::Errored,
        }
    }

    pub const fn stats(&self) -> ReaderStats {
        self.stats
    }

    pub const fn get_ref(&self) -> &R {
        self.records.get_ref()
    }

    /// Reading from the source directly skips the record splitter.
    pub const fn get_mut(&mut self) -> &mut R {
        self.records.get_mut()
    }

    /// Unwrap the source. Buffered bytes not yet delivered are lost.
    pub fn into_inner(self) -> R {
        self.records.into_inner()
    }

    fn fail(&mut self, err: io::Error) -> io::Error {
        debug!(
            error = %err,
            records_read = self.stats.records_read,
            "line stream errored"
        );
        // Callers retry `Interrupted`, so replaying it would never terminate.
        let kind = match err.kind() {
            io::ErrorKind::Interrupted => io::ErrorKind::Other,
            kind => kind,
        };
        self.state = State::Errored {
            kind,
            cause: err.to_string(),
        };
        err
    }

    fn decode(&self, raw: Vec<u8>) -> io::Result<String> {
        match String::from_utf8(raw) {
            Ok(text) => Ok(text),
            Err(e) => match self.invalid_utf8 {
                Utf8Policy::Reject => Err(Error::InvalidUtf8 {
                    record: self.stats.records_read,
                }
                .into()),
                Utf8Policy::Lossy => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
        }
    }
}

impl<R: Read, F: LineFilter> LineFilterReader<R, F> {
    /// Pull records until one is accepted, the source ends, or something
    /// fails. Only called from `Idle`.
    fn advance(&mut self) -> io::Result<()> {
        loop {
            let raw = match self.records.next_record() {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    debug!(stats = ?self.stats, "line stream exhausted");
                    self.state = State::Exhausted;
                    return Ok(());
                }
                Err(e) => return Err(self.fail(e)),
            };
            self.stats.records_read += 1;

            let text = match self.decode(raw) {
                Ok(text) => text,
                Err(e) => return Err(self.fail(e)),
            };

            match self.filter.filter(&text) {
                FilterOutcome::Emit(out) if !out.is_empty() => {
                    trace!(record = self.stats.records_read, len = out.len(), "record emitted");
                    self.stats.records_emitted += 1;
                    self.state = State::RecordReady {
                        record: out.into_bytes(),
                        pos: 0,
                    };
                    return Ok(());
                }
                FilterOutcome::Emit(_) | FilterOutcome::Drop => {
                    trace!(record = self.stats.records_read, "record dropped");
                    self.stats.records_dropped += 1;
                }
                FilterOutcome::Fail(e) => return Err(self.fail(e)),
            }
        }
    }
}

impl<R: Read, F: LineFilter> Read for LineFilterReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if matches!(self.state, State::Idle) {
            self.advance()?;
        }

        match &mut self.state {
            State::RecordReady { record, pos } => {
                let n = (record.len() - *pos).min(buf.len());
                buf[..n].copy_from_slice(&record[*pos..*pos + n]);
                *pos += n;
                if *pos == record.len() {
                    self.state = State::Idle;
                }
                self.stats.bytes_delivered += n as u64;
                Ok(n)
            }
            State::Idle | State::Exhausted => Ok(0),
            State::Errored { kind, cause } => Err(io::Error::new(
                *kind,
                Error::Terminated {
                    cause: cause.clone(),
                },
            )),
        }
    }
}

/// Closing closes the source; the reader itself holds nothing else.
impl<R: Close, F> Close for LineFilterReader<R, F> {
    fn close(&mut self) -> io::Result<()> {
        self.records.get_mut().close()
    }
}

impl<R: fmt::Debug, F> fmt::Debug for LineFilterReader<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineFilterReader")
            .field("source", self.records.get_ref())
            .field("state", &self.state())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
