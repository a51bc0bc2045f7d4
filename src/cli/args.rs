//! Command line argument parsing for the boolmerge CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// boolmerge - compare document-at-a-time and term-at-a-time boolean query
/// evaluation over an inverted index
#[derive(Parser, Debug, Clone)]
#[command(name = "boolmerge")]
#[command(about = "Evaluate AND/OR queries with DAAT and TAAT merges and report their cost")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BoolmergeArgs {
    /// Index file, one `term\c<count>\m[doc/freq, ...]` record per line
    #[arg(value_name = "INDEX_PATH")]
    pub index_path: PathBuf,

    /// Output log file (created or truncated)
    #[arg(value_name = "OUTPUT_LOG")]
    pub output_log: PathBuf,

    /// Number of terms to report by posting list length
    #[arg(value_name = "TOP_K", allow_negative_numbers = true)]
    pub top_k: i64,

    /// Query file, one whitespace separated query per line
    #[arg(value_name = "QUERY_FILE")]
    pub query_file: PathBuf,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Evaluate queries in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of threads for parallel evaluation
    #[arg(short, long, requires = "parallel")]
    pub threads: Option<usize>,

    /// Do not echo the report on stdout
    #[arg(long)]
    pub no_echo: bool,
}

impl BoolmergeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Engine configuration selected by the flags.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default()
            .with_parallel_queries(self.parallel)
            .with_echo_report(!self.no_echo);
        if let Some(threads) = self.threads {
            config = config.with_thread_pool_size(threads);
        }
        config
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line oriented log
    Human,
    /// JSON document
    Json,
}
