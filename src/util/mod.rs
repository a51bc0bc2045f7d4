//! Utility modules for boolmerge.

pub mod lines;
pub mod stopwatch;

// Re-export commonly used types
pub use lines::raw_lines;
pub use stopwatch::StopWatch;
