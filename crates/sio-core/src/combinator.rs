//! Pairs an arbitrary byte source with an arbitrary closable resource.

use std::io::{self, Read};

use crate::close::Close;

/// A reader and a closer presented as one [`ReadClose`](crate::ReadClose).
///
/// Reads go to `R`, closing goes to `C`; neither touches the other. Both
/// halves are required up front, so there is no way to build one that
/// silently succeeds on close with nothing behind it.
#[derive(Debug)]
pub struct ReadCloser<R, C> {
    reader: R,
    closer: C,
}

impl<R, C> ReadCloser<R, C> {
    pub const fn new(reader: R, closer: C) -> Self {
        Self { reader, closer }
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    pub const fn closer(&self) -> &C {
        &self.closer
    }

    pub fn into_parts(self) -> (R, C) {
        (self.reader, self.closer)
    }
}

impl<R: Read, C> Read for ReadCloser<R, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R, C: Close> Close for ReadCloser<R, C> {
    fn close(&mut self) -> io::Result<()> {
        self.closer.close()
    }
}
