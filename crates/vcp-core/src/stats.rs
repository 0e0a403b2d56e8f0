//! Timed accumulation of copy statistics.

use crate::errors::{CopyError, CopyResult};
use std::time::{Duration, Instant};

/// Accumulator for files and bytes copied, valid over a single start/finish
/// measurement window. Counters only grow, and only when a file reaches a
/// copy (or dry-run copy) disposition; directory creation never counts.
#[derive(Debug, Default)]
pub struct CopyStats {
    files_copied: u64,
    bytes_copied: u64,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl CopyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the measurement window.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Close the measurement window. Called once per operation, whether or
    /// not the operation succeeded.
    pub fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
    }

    /// Record one file reaching a copy disposition.
    pub fn add_file(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub fn files_copied(&self) -> u64 {
        self.files_copied
    }

    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Duration of the measurement window. Fails until the window is closed.
    pub fn elapsed(&self) -> CopyResult<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Ok(finished.duration_since(started)),
            _ => Err(CopyError::usage(
                "statistics were queried before the measurement window closed",
            )),
        }
    }

    /// Average bytes per second over the window. A zero-length window has no
    /// defined throughput and is reported as a usage error, not a division
    /// by zero.
    pub fn throughput(&self) -> CopyResult<f64> {
        let seconds = self.elapsed()?.as_secs_f64();
        if seconds <= 0.0 {
            return Err(CopyError::usage(
                "measurement window has zero length, throughput is undefined",
            ));
        }
        Ok(self.bytes_copied as f64 / seconds)
    }
}
