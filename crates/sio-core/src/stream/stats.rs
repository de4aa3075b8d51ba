//! Per-reader record counters.

use serde::{Deserialize, Serialize};

/// Record and byte counts for one [`LineFilterReader`](super::LineFilterReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReaderStats {
    /// Records pulled from the source and handed to the filter.
    #[serde(default)]
    pub records_read: u64,
    #[serde(default)]
    pub records_emitted: u64,
    #[serde(default)]
    pub records_dropped: u64,
    /// Bytes copied into callers' buffers.
    #[serde(default)]
    pub bytes_delivered: u64,
}
