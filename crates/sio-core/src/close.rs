//! The close capability shared by every decorator.
//!
//! `std::io` has no close contract; resources release on drop. Streams that
//! wrap a child process, a socket half or a pooled handle still need an
//! explicit, fallible close, which is what [`Close`] models.

use std::io::{self, Read};

/// An explicitly closable resource.
pub trait Close {
    /// Release the resource, reporting any failure to do so.
    fn close(&mut self) -> io::Result<()>;
}

/// A byte source that can also be closed.
pub trait ReadClose: Read + Close {}

impl<T: Read + Close + ?Sized> ReadClose for T {}

impl<C: Close + ?Sized> Close for &mut C {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Wraps a plain reader with a close that does nothing.
#[derive(Debug, Default, Clone)]
pub struct NopCloser<R> {
    inner: R,
}

impl<R> NopCloser<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for NopCloser<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R> Close for NopCloser<R> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}
