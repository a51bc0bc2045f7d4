//! Boolean query evaluation.
//!
//! Two strategies evaluate the same AND/OR queries:
//!
//! - [`DocumentAtATime`] walks all posting lists in lock-step by document ID.
//! - [`TermAtATime`] folds one term's postings into a running result at a
//!   time, and also reports the comparison count of the same fold with the
//!   lists processed shortest first.
//!
//! Missing query terms are handled asymmetrically by both strategies: AND
//! fails with [`BoolmergeError::TermNotFound`] as soon as any term is absent,
//! while OR evaluates over the terms that are present and only fails when none
//! is.
//!
//! [`BoolmergeError::TermNotFound`]: crate::error::BoolmergeError::TermNotFound

pub mod daat;
pub mod result;
pub mod taat;
pub mod top_k;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use self::daat::DocumentAtATime;
pub use self::result::{EvaluationResult, MergeOutcome};
pub use self::taat::TermAtATime;
pub use self::top_k::top_k;

/// Boolean operator joining the query terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

/// Evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    DocumentAtATime,
    TermAtATime,
}

impl Strategy {
    /// Name under which an evaluation is reported.
    pub fn function_name(&self, operator: Operator) -> &'static str {
        match (self, operator) {
            (Strategy::DocumentAtATime, Operator::And) => "docAtATimeQueryAnd",
            (Strategy::DocumentAtATime, Operator::Or) => "docAtATimeQueryOr",
            (Strategy::TermAtATime, Operator::And) => "termAtATimeQueryAnd",
            (Strategy::TermAtATime, Operator::Or) => "termAtATimeQueryOr",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DocumentAtATime => write!(f, "DAAT"),
            Strategy::TermAtATime => write!(f, "TAAT"),
        }
    }
}

/// Evaluates AND and OR queries against one index.
pub trait Evaluator: Send + Sync {
    /// The strategy implemented.
    fn strategy(&self) -> Strategy;

    /// Intersection of the posting lists of every query term.
    fn and(&self, query: &[String]) -> Result<EvaluationResult>;

    /// Union of the posting lists of the query terms present in the index.
    fn or(&self, query: &[String]) -> Result<EvaluationResult>;

    /// Dispatch on `operator`.
    fn evaluate(&self, operator: Operator, query: &[String]) -> Result<EvaluationResult> {
        match operator {
            Operator::And => self.and(query),
            Operator::Or => self.or(query),
        }
    }
}

/// Split a query line into terms on whitespace.
pub fn parse_query(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
