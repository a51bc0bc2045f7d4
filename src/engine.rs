//! Batch evaluation over both index orderings.
//!
//! The [`Engine`] owns a document-ID ordered index for document-at-a-time
//! evaluation and a frequency ordered index for term-at-a-time evaluation,
//! both built from the same records. Queries are pure functions of the two
//! indexes, so a batch can be spread over a rayon thread pool; the report
//! keeps input order either way.

use std::path::Path;
use std::sync::Arc;

use log::info;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::EngineConfig;
use crate::error::{BoolmergeError, Result};
use crate::index::{Index, IndexRecord};
use crate::posting::PostingOrder;
use crate::query::{DocumentAtATime, Evaluator, Operator, Strategy, TermAtATime, top_k};
use crate::report::{EvaluationReport, QueryReport, RunReport, TermPostings, TopKReport};

/// Evaluation order of the four (strategy, operator) pairs within a query.
const EVALUATION_ORDER: [(Strategy, Operator); 4] = [
    (Strategy::TermAtATime, Operator::And),
    (Strategy::TermAtATime, Operator::Or),
    (Strategy::DocumentAtATime, Operator::And),
    (Strategy::DocumentAtATime, Operator::Or),
];

/// Evaluates query batches with both strategies.
pub struct Engine {
    config: EngineConfig,
    daat: DocumentAtATime,
    taat: TermAtATime,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Engine {
    /// Build an engine from a document-ID ordered and a frequency ordered
    /// index.
    pub fn new(daat_index: Index, taat_index: Index, config: EngineConfig) -> Result<Self> {
        let thread_pool = if config.parallel_queries {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.effective_threads())
                .thread_name(|i| format!("boolmerge-eval-{i}"))
                .build()
                .map_err(|e| {
                    BoolmergeError::internal(format!("Failed to create thread pool: {e}"))
                })?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Engine {
            config,
            daat: DocumentAtATime::new(daat_index)?,
            taat: TermAtATime::new(taat_index)?,
            thread_pool,
        })
    }

    /// Load both orderings of an index file.
    pub fn open<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        let path = path.as_ref();
        let daat_index = Index::open(path, PostingOrder::DocumentId)?;
        let taat_index = Index::open(path, PostingOrder::Frequency)?;
        Engine::new(daat_index, taat_index, config)
    }

    /// Build both orderings from in-memory records.
    pub fn from_records(records: Vec<IndexRecord>, config: EngineConfig) -> Result<Self> {
        let daat_index = Index::from_records(records.iter().cloned(), PostingOrder::DocumentId);
        let taat_index = Index::from_records(records, PostingOrder::Frequency);
        Engine::new(daat_index, taat_index, config)
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The document-at-a-time evaluator.
    pub fn document_at_a_time(&self) -> &DocumentAtATime {
        &self.daat
    }

    /// The term-at-a-time evaluator.
    pub fn term_at_a_time(&self) -> &TermAtATime {
        &self.taat
    }

    /// The evaluator implementing `strategy`.
    pub fn evaluator(&self, strategy: Strategy) -> &dyn Evaluator {
        match strategy {
            Strategy::DocumentAtATime => &self.daat,
            Strategy::TermAtATime => &self.taat,
        }
    }

    /// Posting dump of `term` under both orderings.
    pub fn postings(&self, term: &str) -> TermPostings {
        TermPostings {
            term: term.to_string(),
            by_document_id: self
                .daat
                .index()
                .posting_list(term)
                .map(|list| list.document_ids()),
            by_frequency: self
                .taat
                .index()
                .posting_list(term)
                .map(|list| list.document_ids()),
        }
    }

    /// The `k` terms with the longest posting lists.
    pub fn top_k(&self, k: i64) -> Result<TopKReport> {
        let terms = top_k(self.daat.index(), k)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(TopKReport { k, terms })
    }

    /// Evaluate one query with both strategies and both operators.
    pub fn evaluate(&self, query: &[String]) -> Result<QueryReport> {
        let postings = query.iter().map(|term| self.postings(term)).collect();

        let evaluations = EVALUATION_ORDER
            .iter()
            .map(|&(strategy, operator)| {
                EvaluationReport::from_evaluation(
                    strategy,
                    operator,
                    self.evaluator(strategy).evaluate(operator, query),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryReport {
            terms: query.to_vec(),
            postings,
            evaluations,
        })
    }

    /// Evaluate a batch of queries, in input order.
    pub fn evaluate_all(&self, queries: &[Vec<String>]) -> Result<Vec<QueryReport>> {
        match &self.thread_pool {
            Some(pool) => pool.install(|| {
                queries
                    .par_iter()
                    .map(|query| self.evaluate(query))
                    .collect()
            }),
            None => queries.iter().map(|query| self.evaluate(query)).collect(),
        }
    }

    /// Select the top-K terms, then evaluate every query.
    pub fn run(&self, k: i64, queries: &[Vec<String>]) -> Result<RunReport> {
        let top_k = self.top_k(k)?;
        let queries = self.evaluate_all(queries)?;
        info!("Evaluated {} queries", queries.len());
        Ok(RunReport { top_k, queries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::Posting;
    use crate::report::Outcome;

    fn records() -> Vec<IndexRecord> {
        vec![
            IndexRecord::new(
                "cat",
                "3",
                vec![Posting::new(1, 3), Posting::new(2, 1), Posting::new(5, 2)],
            ),
            IndexRecord::new(
                "dog",
                "3",
                vec![Posting::new(2, 1), Posting::new(5, 1), Posting::new(9, 4)],
            ),
            IndexRecord::new("eel", "1", vec![Posting::new(4, 7)]),
        ]
    }

    fn query(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_postings_dump() {
        let engine = Engine::from_records(records(), EngineConfig::default()).unwrap();

        let cat = engine.postings("cat");
        assert_eq!(cat.by_document_id, Some(vec![1, 2, 5]));
        assert_eq!(cat.by_frequency, Some(vec![1, 5, 2]));

        let missing = engine.postings("zzz");
        assert_eq!(missing.by_document_id, None);
        assert_eq!(missing.by_frequency, None);
    }

    #[test]
    fn test_evaluate_reports_four_evaluations_in_order() {
        let engine = Engine::from_records(records(), EngineConfig::default()).unwrap();
        let report = engine.evaluate(&query(&["cat", "dog"])).unwrap();

        let names: Vec<&str> = report.evaluations.iter().map(|e| e.function_name()).collect();
        assert_eq!(
            names,
            vec![
                "termAtATimeQueryAnd",
                "termAtATimeQueryOr",
                "docAtATimeQueryAnd",
                "docAtATimeQueryOr"
            ]
        );
        assert_eq!(report.postings.len(), 2);

        let daat_and = report
            .evaluation(Strategy::DocumentAtATime, Operator::And)
            .and_then(|e| e.matched())
            .unwrap();
        assert_eq!(daat_and.document_ids(), &[2, 5]);
    }

    #[test]
    fn test_evaluate_missing_term() {
        let engine = Engine::from_records(records(), EngineConfig::default()).unwrap();
        let report = engine.evaluate(&query(&["cat", "zzz"])).unwrap();

        for strategy in [Strategy::TermAtATime, Strategy::DocumentAtATime] {
            let and = report.evaluation(strategy, Operator::And).unwrap();
            assert_eq!(and.outcome, Outcome::NotFound);

            let or = report.evaluation(strategy, Operator::Or).unwrap();
            assert_eq!(or.matched().unwrap().document_ids(), &[1, 2, 5]);
        }
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let queries = vec![
            query(&["cat", "dog"]),
            query(&["eel", "cat"]),
            query(&["zzz"]),
            query(&["dog", "dog", "cat"]),
        ];

        let sequential = Engine::from_records(records(), EngineConfig::default())
            .unwrap()
            .run(2, &queries)
            .unwrap();
        let parallel = Engine::from_records(
            records(),
            EngineConfig::default()
                .with_parallel_queries(true)
                .with_thread_pool_size(2),
        )
        .unwrap()
        .run(2, &queries)
        .unwrap();

        assert_eq!(sequential.top_k.terms, vec!["cat", "dog"]);
        assert_eq!(sequential.queries.len(), parallel.queries.len());
        for (a, b) in sequential.queries.iter().zip(&parallel.queries) {
            assert_eq!(a.terms, b.terms);
            for (x, y) in a.evaluations.iter().zip(&b.evaluations) {
                assert_eq!(
                    x.matched().map(|r| r.document_ids()),
                    y.matched().map(|r| r.document_ids())
                );
                assert_eq!(
                    x.matched().map(|r| r.comparisons()),
                    y.matched().map(|r| r.comparisons())
                );
            }
        }
    }

    #[test]
    fn test_run_rejects_negative_k() {
        let engine = Engine::from_records(records(), EngineConfig::default()).unwrap();
        let err = engine.run(-3, &[]).unwrap_err();
        assert!(matches!(err, BoolmergeError::InvalidArgument(_)));
    }
}
