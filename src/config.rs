//! Configuration for query batch evaluation.

use serde::{Deserialize, Serialize};

/// Configuration for the [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Evaluate the queries of a batch in parallel.
    pub parallel_queries: bool,

    /// Thread pool size for parallel evaluation.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Print the rendered report on stdout in addition to the output log.
    pub echo_report: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_queries: false,
            thread_pool_size: None,
            echo_report: true,
        }
    }
}

impl EngineConfig {
    /// Enable or disable parallel query evaluation.
    pub fn with_parallel_queries(mut self, parallel: bool) -> Self {
        self.parallel_queries = parallel;
        self
    }

    /// Set the thread pool size.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Enable or disable echoing the report on stdout.
    pub fn with_echo_report(mut self, echo: bool) -> Self {
        self.echo_report = echo;
        self
    }

    /// Number of worker threads to use for parallel evaluation.
    pub fn effective_threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get).max(1)
    }
}
