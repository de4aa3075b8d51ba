//! `sio` Core Library
//!
//! Composable decorators for byte streams:
//! - Line-filtering reader: split a source into newline records, filter
//!   each one, serve the survivors as a byte stream
//! - JSON-line filter built on top of it
//! - Tee decorator mirroring reads into a side sink
//! - Reader/closer pairing
//! - Configuration, tracing setup and common error types

pub mod close;
pub mod combinator;
pub mod config;
pub mod error;
pub mod stream;
pub mod tee;
#[cfg(test)]
mod test_utils;
pub mod tracing_init;

pub use close::{Close, NopCloser, ReadClose};
pub use combinator::ReadCloser;
pub use config::{StreamConfig, Utf8Policy};
pub use error::{Error, Result};
pub use stream::{
    FilterOutcome, JsonLineFilter, LineFilter, LineFilterReader, json_filter_read_closer,
};
pub use tee::TeeReadCloser;
