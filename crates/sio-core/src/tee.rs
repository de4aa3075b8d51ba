//! Tee decorator: mirrors everything read from a source into a side sink.

use std::io::{self, Read, Write};

use crate::close::Close;

/// Reads from `R`, copying every byte handed to the caller into `W`.
///
/// Closing closes the source only. The sink is borrowed or owned, but it is
/// never closed here; flush or drop it yourself.
#[derive(Debug)]
pub struct TeeReadCloser<R, W> {
    reader: R,
    sink: W,
}

impl<R, W> TeeReadCloser<R, W> {
    pub const fn new(reader: R, sink: W) -> Self {
        Self { reader, sink }
    }

    pub const fn get_ref(&self) -> &R {
        &self.reader
    }

    pub const fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.sink)
    }
}

impl<R: Read, W: Write> Read for TeeReadCloser<R, W> {
    /// A sink failure is returned from this call; the bytes already placed
    /// in `buf` are then not counted as read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.sink.write_all(&buf[..n])?;
        }
        Ok(n)
    }
}

impl<R: Close, W> Close for TeeReadCloser<R, W> {
    fn close(&mut self) -> io::Result<()> {
        self.reader.close()
    }
}
