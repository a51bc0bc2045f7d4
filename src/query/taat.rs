//! Term-at-a-time evaluation.
//!
//! The running result is seeded with the first term's postings and every
//! further term is folded into it with linear membership scans. This costs
//! O(n * m) comparisons per fold and is kept that way on purpose so the
//! counts can be set against the document-at-a-time merges.

use log::debug;

use crate::error::{BoolmergeError, Result};
use crate::index::Index;
use crate::posting::{Posting, PostingList, PostingOrder};
use crate::query::result::{EvaluationResult, MergeOutcome};
use crate::query::{Evaluator, Operator, Strategy};
use crate::util::stopwatch::StopWatch;

/// Pairwise intersection fold.
///
/// For each posting of the running result, the next term's list is scanned
/// until a match; each element examined is one comparison. Postings without
/// a match are dropped.
pub fn fold_and(lists: &[&PostingList]) -> MergeOutcome {
    let Some((first, rest)) = lists.split_first() else {
        return MergeOutcome::default();
    };

    let mut result = (*first).clone();
    let mut comparisons = 0u64;

    for list in rest {
        result.retain(|posting| list.contains_document(posting.doc_id, &mut comparisons));
    }

    MergeOutcome::new(result, comparisons)
}

/// Pairwise union fold.
///
/// For each posting of the next term's list, the running result as it stood
/// at the start of the round is scanned until a match; each element examined
/// is one comparison. Unmatched postings are appended once the round is over.
pub fn fold_or(lists: &[&PostingList]) -> MergeOutcome {
    let Some((first, rest)) = lists.split_first() else {
        return MergeOutcome::default();
    };

    let mut result = (*first).clone();
    let mut comparisons = 0u64;

    for list in rest {
        let appended: Vec<Posting> = list
            .iter()
            .filter(|posting| !result.contains_document(posting.doc_id, &mut comparisons))
            .copied()
            .collect();
        result.extend(appended);
    }

    MergeOutcome::new(result, comparisons)
}

/// The same lists, shortest first. Lists of equal length keep query order.
pub fn by_length<'a>(lists: &[&'a PostingList]) -> Vec<&'a PostingList> {
    let mut sorted = lists.to_vec();
    sorted.sort_by_key(|list| list.len());
    sorted
}

/// Term-at-a-time evaluator over a frequency ordered index.
#[derive(Debug, Clone)]
pub struct TermAtATime {
    index: Index,
}

impl TermAtATime {
    /// Wrap an index sorted by descending frequency.
    pub fn new(index: Index) -> Result<Self> {
        if index.order() != PostingOrder::Frequency {
            return Err(BoolmergeError::invalid_argument(format!(
                "term-at-a-time evaluation needs a {:?} ordered index, got {:?}",
                PostingOrder::Frequency,
                index.order()
            )));
        }
        Ok(TermAtATime { index })
    }

    /// The underlying index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Time the baseline fold, then count the shortest-first fold.
    fn finish(
        &self,
        operator: Operator,
        query: &[String],
        fold: fn(&[&PostingList]) -> MergeOutcome,
        lists: Vec<&PostingList>,
    ) -> Result<EvaluationResult> {
        let mut stop_watch = StopWatch::start();
        let baseline = fold(&lists);
        stop_watch.stop();

        let optimized = fold(&by_length(&lists));

        debug!(
            "{} {:?} over {:?}: {} documents, {} comparisons ({} optimized)",
            self.strategy(),
            operator,
            query,
            baseline.postings.len(),
            baseline.comparisons,
            optimized.comparisons
        );

        Ok(
            EvaluationResult::new(self.strategy(), operator, baseline, &stop_watch)?
                .with_optimized_comparisons(optimized.comparisons),
        )
    }
}

impl Evaluator for TermAtATime {
    fn strategy(&self) -> Strategy {
        Strategy::TermAtATime
    }

    fn and(&self, query: &[String]) -> Result<EvaluationResult> {
        if query.is_empty() {
            return Err(BoolmergeError::term_not_found("empty query"));
        }
        let lists = self.index.require_posting_lists(query)?;
        self.finish(Operator::And, query, fold_and, lists)
    }

    fn or(&self, query: &[String]) -> Result<EvaluationResult> {
        let lists = self.index.posting_lists(query);
        if lists.is_empty() {
            return Err(BoolmergeError::term_not_found(query.join(", ")));
        }
        self.finish(Operator::Or, query, fold_or, lists)
    }
}
