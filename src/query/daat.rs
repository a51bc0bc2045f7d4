//! Document-at-a-time evaluation.
//!
//! Every participating posting list gets a forward pointer and all pointers
//! advance together, synchronized on document ID. The lists must be sorted by
//! ascending document ID without duplicates.

use log::debug;

use crate::error::{BoolmergeError, Result};
use crate::index::Index;
use crate::posting::{Posting, PostingList, PostingOrder};
use crate::query::result::{EvaluationResult, MergeOutcome};
use crate::query::{Evaluator, Operator, Strategy};
use crate::util::stopwatch::StopWatch;

/// K-way intersection of document-ID ordered lists.
///
/// Each round compares every head after the first against the first head.
/// When they all match the document is emitted and every pointer moves on.
/// Otherwise each head is compared once to find the maximum, and once more
/// against that maximum; heads strictly below it advance. The merge stops as
/// soon as any pointer runs off its list.
pub fn intersect(lists: &[&PostingList]) -> MergeOutcome {
    let mut result = PostingList::new();
    let mut comparisons = 0u64;
    let mut pointers = vec![0usize; lists.len()];

    'merge: loop {
        let mut first: Option<Posting> = None;
        let mut all_equal = true;

        for (list, &pointer) in lists.iter().zip(&pointers) {
            let Some(&head) = list.get(pointer) else {
                break 'merge;
            };
            match first {
                None => first = Some(head),
                Some(first) => {
                    comparisons += 1;
                    if first.doc_id != head.doc_id {
                        all_equal = false;
                    }
                }
            }
        }

        let Some(first) = first else {
            break;
        };

        if all_equal {
            result.push(first);
            for pointer in pointers.iter_mut() {
                *pointer += 1;
            }
            continue;
        }

        let mut max_doc_id = 0;
        for (list, &pointer) in lists.iter().zip(&pointers) {
            if let Some(head) = list.get(pointer) {
                comparisons += 1;
                if head.doc_id > max_doc_id {
                    max_doc_id = head.doc_id;
                }
            }
        }

        for (list, pointer) in lists.iter().zip(pointers.iter_mut()) {
            let Some(head) = list.get(*pointer) else {
                break 'merge;
            };
            comparisons += 1;
            if head.doc_id < max_doc_id {
                *pointer += 1;
            }
        }
    }

    MergeOutcome::new(result, comparisons)
}

/// K-way union of document-ID ordered lists.
///
/// Each round compares every live head against the running minimum, emits the
/// minimum once, then compares every live head against it again and advances
/// the ones that match. The merge stops when every list is exhausted.
pub fn union(lists: &[&PostingList]) -> MergeOutcome {
    let mut result = PostingList::new();
    let mut comparisons = 0u64;
    let mut pointers = vec![0usize; lists.len()];

    loop {
        let mut min: Option<Posting> = None;

        for (list, &pointer) in lists.iter().zip(&pointers) {
            if let Some(&head) = list.get(pointer) {
                comparisons += 1;
                if min.is_none_or(|min| head.doc_id < min.doc_id) {
                    min = Some(head);
                }
            }
        }

        // Every pointer is exhausted.
        let Some(min) = min else {
            break;
        };
        result.push(min);

        for (list, pointer) in lists.iter().zip(pointers.iter_mut()) {
            if let Some(head) = list.get(*pointer) {
                comparisons += 1;
                if head.doc_id == min.doc_id {
                    *pointer += 1;
                }
            }
        }
    }

    MergeOutcome::new(result, comparisons)
}

/// Document-at-a-time evaluator over a document-ID ordered index.
#[derive(Debug, Clone)]
pub struct DocumentAtATime {
    index: Index,
}

impl DocumentAtATime {
    /// Wrap an index sorted by document ID.
    pub fn new(index: Index) -> Result<Self> {
        if index.order() != PostingOrder::DocumentId {
            return Err(BoolmergeError::invalid_argument(format!(
                "document-at-a-time evaluation needs a {:?} ordered index, got {:?}",
                PostingOrder::DocumentId,
                index.order()
            )));
        }
        Ok(DocumentAtATime { index })
    }

    /// The underlying index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    fn finish(
        &self,
        operator: Operator,
        query: &[String],
        merge: fn(&[&PostingList]) -> MergeOutcome,
        lists: Vec<&PostingList>,
    ) -> Result<EvaluationResult> {
        let mut stop_watch = StopWatch::start();
        let outcome = merge(&lists);
        stop_watch.stop();

        debug!(
            "{} {:?} over {:?}: {} documents, {} comparisons",
            self.strategy(),
            operator,
            query,
            outcome.postings.len(),
            outcome.comparisons
        );

        EvaluationResult::new(self.strategy(), operator, outcome, &stop_watch)
    }
}

impl Evaluator for DocumentAtATime {
    fn strategy(&self) -> Strategy {
        Strategy::DocumentAtATime
    }

    fn and(&self, query: &[String]) -> Result<EvaluationResult> {
        if query.is_empty() {
            return Err(BoolmergeError::term_not_found("empty query"));
        }
        let lists = self.index.require_posting_lists(query)?;
        self.finish(Operator::And, query, intersect, lists)
    }

    fn or(&self, query: &[String]) -> Result<EvaluationResult> {
        let lists = self.index.posting_lists(query);
        if lists.is_empty() {
            return Err(BoolmergeError::term_not_found(query.join(", ")));
        }
        self.finish(Operator::Or, query, union, lists)
    }
}
