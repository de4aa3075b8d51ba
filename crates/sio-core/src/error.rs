//! Error types for the `sio` stream decorators.

use std::io;

use thiserror::Error;

/// Result type alias using the `sio` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `sio` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A stream was requested over an absent source.
    #[error("reader is nil")]
    NilReader,

    /// A record grew past the configured size limit before its newline.
    #[error("record exceeds {limit} bytes without a newline")]
    RecordTooLong { limit: usize },

    /// A record was not valid UTF-8 and the policy rejects it.
    #[error("record {record} is not valid UTF-8")]
    InvalidUtf8 { record: u64 },

    /// Read attempted after the stream already failed.
    #[error("stream terminated by earlier error: {cause}")]
    Terminated { cause: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("Tracing init error: {0}")]
    Tracing(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(inner) => inner,
            Error::NilReader => Self::new(io::ErrorKind::InvalidInput, err),
            Error::RecordTooLong { .. } | Error::InvalidUtf8 { .. } => {
                Self::new(io::ErrorKind::InvalidData, err)
            }
            Error::Terminated { .. } | Error::Config(_) | Error::Tracing(_) => Self::other(err),
        }
    }
}
