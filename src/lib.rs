//! # boolmerge
//!
//! Boolean (AND/OR) query evaluation over a precomputed inverted index with
//! two classical strategies, document-at-a-time and term-at-a-time, each
//! instrumented with comparison counts and timings.
//!
//! ## Features
//!
//! - Index loading with per-strategy posting order
//! - K-way document-at-a-time intersection and union
//! - Pairwise term-at-a-time folds, with a shortest-list-first variant
//! - Top-K terms by posting list length
//! - Optional parallel evaluation of query batches

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod posting;
pub mod query;
pub mod report;
pub mod util;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::Engine;
    pub use crate::error::{BoolmergeError, Result};
    pub use crate::index::{Index, IndexRecord};
    pub use crate::posting::{Posting, PostingList, PostingOrder};
    pub use crate::query::{
        DocumentAtATime, EvaluationResult, Evaluator, Operator, Strategy, TermAtATime,
    };
    pub use crate::report::{Outcome, QueryReport, RunReport};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
