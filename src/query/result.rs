//! Evaluation results and counters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::posting::PostingList;
use crate::query::{Operator, Strategy};
use crate::util::stopwatch::StopWatch;

/// Raw output of a merge: the merged postings and the comparisons it took.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub postings: PostingList,
    pub comparisons: u64,
}

impl MergeOutcome {
    pub fn new(postings: PostingList, comparisons: u64) -> Self {
        MergeOutcome {
            postings,
            comparisons,
        }
    }
}

/// The outcome of one (strategy, operator, query) evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    strategy: Strategy,
    operator: Operator,
    /// Matching document IDs, ascending.
    document_ids: Vec<u64>,
    comparisons: u64,
    /// Comparisons of the shortest-list-first fold. Term-at-a-time only.
    optimized_comparisons: Option<u64>,
    elapsed: Duration,
}

impl EvaluationResult {
    /// Build a result from a finished merge.
    ///
    /// Fails with `InvalidState` when `stop_watch` is still running.
    pub fn new(
        strategy: Strategy,
        operator: Operator,
        merge: MergeOutcome,
        stop_watch: &StopWatch,
    ) -> Result<Self> {
        let elapsed = stop_watch.elapsed()?;

        let mut document_ids = merge.postings.document_ids();
        document_ids.sort_unstable();
        document_ids.dedup();

        Ok(EvaluationResult {
            strategy,
            operator,
            document_ids,
            comparisons: merge.comparisons,
            optimized_comparisons: None,
            elapsed,
        })
    }

    /// Attach the comparison count of the optimized pass.
    pub fn with_optimized_comparisons(mut self, comparisons: u64) -> Self {
        self.optimized_comparisons = Some(comparisons);
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Matching document IDs in ascending order.
    pub fn document_ids(&self) -> &[u64] {
        &self.document_ids
    }

    /// Number of matching documents.
    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn optimized_comparisons(&self) -> Option<u64> {
        self.optimized_comparisons
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time truncated to whole seconds.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}
