//! Fake sources shared by the unit tests.

use std::io::{self, Cursor, Read};

use crate::close::Close;

/// In-memory source that records whether it was closed.
#[derive(Debug)]
pub struct MockReadCloser {
    data: Cursor<Vec<u8>>,
    pub closed: bool,
    pub close_error: Option<&'static str>,
}

impl MockReadCloser {
    pub fn new(data: &str) -> Self {
        Self {
            data: Cursor::new(data.as_bytes().to_vec()),
            closed: false,
            close_error: None,
        }
    }

    pub fn failing_close(data: &str, msg: &'static str) -> Self {
        Self {
            close_error: Some(msg),
            ..Self::new(data)
        }
    }
}

impl Read for MockReadCloser {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Close for MockReadCloser {
    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        match self.close_error {
            Some(msg) => Err(io::Error::other(msg)),
            None => Ok(()),
        }
    }
}

/// Hands out at most `chunk` bytes per read, then optionally fails once the
/// data runs out instead of reporting end of input.
#[derive(Debug)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    fail_at_end: Option<io::ErrorKind>,
    interrupt_every_other: bool,
    interrupted_last: bool,
    pub reads: usize,
}

impl ChunkedReader {
    pub fn new(data: &str, chunk: usize) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            pos: 0,
            chunk,
            fail_at_end: None,
            interrupt_every_other: false,
            interrupted_last: false,
            reads: 0,
        }
    }

    pub fn from_bytes(data: &[u8], chunk: usize) -> Self {
        Self {
            data: data.to_vec(),
            ..Self::new("", chunk)
        }
    }

    pub fn failing_at_end(mut self, kind: io::ErrorKind) -> Self {
        self.fail_at_end = Some(kind);
        self
    }

    pub fn interrupting(mut self) -> Self {
        self.interrupt_every_other = true;
        self
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.interrupt_every_other {
            self.interrupted_last = !self.interrupted_last;
            if self.interrupted_last {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
        }
        let remaining = &self.data[self.pos..];
        if remaining.is_empty() {
            return match self.fail_at_end {
                Some(kind) => Err(io::Error::new(kind, "source failed")),
                None => Ok(0),
            };
        }
        let n = remaining.len().min(buf.len()).min(self.chunk);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Drain `reader` using a destination of `buf_size` bytes, returning the
/// bytes read and the first error, if any.
pub fn drain(reader: &mut impl Read, buf_size: usize) -> (Vec<u8>, Option<io::Error>) {
    let mut out = Vec::new();
    let mut buf = vec![0u8; buf_size];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return (out, None),
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(e) => return (out, Some(e)),
        }
    }
}
