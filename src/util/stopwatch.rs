//! Start/stop timer used to time merges.

use std::time::{Duration, Instant};

use crate::error::{BoolmergeError, Result};

/// A timer that only reports once it has been stopped.
#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    started: Instant,
    stopped: Option<Instant>,
}

impl StopWatch {
    /// Create a running stopwatch.
    pub fn start() -> Self {
        StopWatch {
            started: Instant::now(),
            stopped: None,
        }
    }

    /// Stop the stopwatch. Stopping twice keeps the first stop time.
    pub fn stop(&mut self) {
        if self.stopped.is_none() {
            self.stopped = Some(Instant::now());
        }
    }

    /// Whether [`StopWatch::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    /// Time between start and stop.
    pub fn elapsed(&self) -> Result<Duration> {
        match self.stopped {
            Some(stopped) => Ok(stopped.duration_since(self.started)),
            None => Err(BoolmergeError::invalid_state(
                "stop() must be called before reading elapsed time",
            )),
        }
    }

    /// Elapsed time truncated to whole seconds.
    pub fn elapsed_seconds(&self) -> Result<u64> {
        Ok(self.elapsed()?.as_secs())
    }
}
