//! Newline record splitting over an arbitrary byte source.

use std::io::{self, Read};

use crate::error::Error;

/// Pulls newline-terminated records out of `R`.
///
/// A record ends right after a `\n`, which stays part of it. Bytes left over
/// when the source ends form one final, unterminated record; an input ending
/// exactly on a newline produces no empty trailing record. Once the source
/// reports end of input it is never read again.
///
/// A source error behaves like end of input for the bytes already buffered:
/// they are returned as the final record, and the error follows on the next
/// call.
#[derive(Debug)]
pub(crate) struct RecordSplitter<R> {
    source: R,
    buf: Vec<u8>,
    start: usize,
    read_capacity: usize,
    max_record_bytes: usize,
    eof: bool,
    deferred: Option<io::Error>,
}

impl<R> RecordSplitter<R> {
    pub(crate) const fn new(source: R, read_capacity: usize, max_record_bytes: usize) -> Self {
        Self {
            source,
            buf: Vec::new(),
            start: 0,
            read_capacity,
            max_record_bytes,
            eof: false,
            deferred: None,
        }
    }

    pub(crate) const fn get_ref(&self) -> &R {
        &self.source
    }

    pub(crate) const fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub(crate) fn into_inner(self) -> R {
        self.source
    }

    fn too_long(&self) -> io::Error {
        Error::RecordTooLong {
            limit: self.max_record_bytes,
        }
        .into()
    }
}

impl<R: Read> RecordSplitter<R> {
    /// Next record, `Ok(None)` at end of input, or the source's error.
    pub(crate) fn next_record(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        let mut scanned = 0;
        loop {
            let pending = &self.buf[self.start..];
            if let Some(i) = pending[scanned..].iter().position(|&b| b == b'\n') {
                let end = scanned + i + 1;
                if end > self.max_record_bytes {
                    return Err(self.too_long());
                }
                let record = pending[..end].to_vec();
                self.start += end;
                return Ok(Some(record));
            }
            scanned = pending.len();

            if self.eof {
                if pending.is_empty() {
                    return Ok(None);
                }
                if pending.len() > self.max_record_bytes {
                    return Err(self.too_long());
                }
                let record = pending.to_vec();
                self.start = self.buf.len();
                return Ok(Some(record));
            }
            if pending.len() >= self.max_record_bytes {
                return Err(self.too_long());
            }

            if let Err(err) = self.fill() {
                if self.start == self.buf.len() {
                    return Err(err);
                }
                self.deferred = Some(err);
                self.eof = true;
            }
        }
    }

    /// Append one upstream read to the buffer, retrying on `Interrupted`.
    fn fill(&mut self) -> io::Result<()> {
        if self.start > 0 {
            let kept = self.buf.len() - self.start;
            self.buf.copy_within(self.start.., 0);
            self.buf.truncate(kept);
            self.start = 0;
        }
        let filled = self.buf.len();
        self.buf.resize(filled + self.read_capacity, 0);
        loop {
            match self.source.read(&mut self.buf[filled..]) {
                Ok(n) => {
                    self.buf.truncate(filled + n);
                    self.eof = n == 0;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.buf.truncate(filled);
                    return Err(e);
                }
            }
        }
    }
}
