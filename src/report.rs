//! Structured results of a query batch.
//!
//! The engine fills a [`RunReport`]; rendering it to text or JSON is left to
//! the caller.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::{EvaluationResult, Operator, Strategy};

/// Everything produced by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub top_k: TopKReport,
    pub queries: Vec<QueryReport>,
}

/// The top-K terms of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopKReport {
    pub k: i64,
    pub terms: Vec<String>,
}

/// Posting dump of one query term under both orderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPostings {
    pub term: String,
    /// Document IDs in document-ID order, None if the term is not indexed.
    pub by_document_id: Option<Vec<u64>>,
    /// Document IDs in frequency order, None if the term is not indexed.
    pub by_frequency: Option<Vec<u64>>,
}

/// Outcome of one evaluation as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// At least one required term is missing.
    NotFound,
    /// The evaluation ran. The result may still be empty.
    Found(EvaluationResult),
}

/// One (strategy, operator) evaluation of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub strategy: Strategy,
    pub operator: Operator,
    pub outcome: Outcome,
}

impl EvaluationReport {
    /// Fold an evaluation into a report.
    ///
    /// `TermNotFound` becomes [`Outcome::NotFound`]; any other error is
    /// returned.
    pub fn from_evaluation(
        strategy: Strategy,
        operator: Operator,
        evaluation: Result<EvaluationResult>,
    ) -> Result<Self> {
        let outcome = match evaluation {
            Ok(result) => Outcome::Found(result),
            Err(e) if e.is_term_not_found() => Outcome::NotFound,
            Err(e) => return Err(e),
        };
        Ok(EvaluationReport {
            strategy,
            operator,
            outcome,
        })
    }

    /// Name under which this evaluation is logged.
    pub fn function_name(&self) -> &'static str {
        self.strategy.function_name(self.operator)
    }

    /// The result, when the evaluation ran and matched something.
    pub fn matched(&self) -> Option<&EvaluationResult> {
        match &self.outcome {
            Outcome::Found(result) if !result.is_empty() => Some(result),
            _ => None,
        }
    }
}

/// Everything produced for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    pub terms: Vec<String>,
    pub postings: Vec<TermPostings>,
    pub evaluations: Vec<EvaluationReport>,
}

impl QueryReport {
    /// Look up the evaluation of one (strategy, operator) pair.
    pub fn evaluation(&self, strategy: Strategy, operator: Operator) -> Option<&EvaluationReport> {
        self.evaluations
            .iter()
            .find(|e| e.strategy == strategy && e.operator == operator)
    }
}
