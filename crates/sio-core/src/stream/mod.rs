//! Line-filtering streams.
//!
//! [`LineFilterReader`] sits between a byte source and its consumer: it splits
//! the source into newline records, passes each through a [`LineFilter`] and
//! serves whatever the filter accepts as an ordinary [`std::io::Read`].

mod filter;
mod json;
mod reader;
mod split;
mod stats;

pub use filter::{FilterOutcome, Identity, LineFilter, OrIdentity, StringFilter};
pub use json::{
    JsonFilterReadCloser, JsonLineFilter, is_valid_json, json_filter_read_closer,
    json_filter_reader,
};
pub use reader::{LineFilterReader, ReaderState};
pub use stats::ReaderStats;
