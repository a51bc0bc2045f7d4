//! Term to posting list mapping.
//!
//! An [`Index`] is built once, from index records, under a single
//! [`PostingOrder`]. It is read-only afterwards; the document-at-a-time and
//! term-at-a-time evaluators each get their own instance over the same
//! records.

pub mod parser;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info, warn};

use crate::error::{BoolmergeError, Result};
use crate::posting::{PostingList, PostingOrder};
use crate::util::lines::raw_lines;
use crate::util::stopwatch::StopWatch;

pub use self::parser::{IndexRecord, parse_record};

/// An immutable inverted index sorted under one ordering policy.
#[derive(Debug, Clone)]
pub struct Index {
    /// Ordering applied to every posting list.
    order: PostingOrder,
    /// Terms and their posting lists, in record order.
    terms: Vec<(String, PostingList)>,
    /// Term to position in `terms`.
    lookup: AHashMap<String, usize>,
    /// Number of malformed records skipped while loading.
    skipped_records: usize,
}

impl Index {
    /// Build an index from already decomposed records.
    ///
    /// A term seen twice keeps its first position; the later record's
    /// postings replace the earlier ones.
    pub fn from_records<I>(records: I, order: PostingOrder) -> Self
    where
        I: IntoIterator<Item = IndexRecord>,
    {
        let mut index = Index {
            order,
            terms: Vec::new(),
            lookup: AHashMap::new(),
            skipped_records: 0,
        };
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Build an index from raw index lines, skipping malformed ones.
    pub fn from_lines<I, S>(lines: I, order: PostingOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Index::from_records(std::iter::empty(), order);
        for (line_num, line) in lines.into_iter().enumerate() {
            index.insert_line(line_num + 1, line.as_ref());
        }
        index
    }

    /// Load an index file.
    pub fn open<P: AsRef<Path>>(path: P, order: PostingOrder) -> Result<Self> {
        let path = path.as_ref();
        let mut stop_watch = StopWatch::start();

        let file = File::open(path).map_err(|e| BoolmergeError::file_read(path, e))?;
        let reader = BufReader::new(file);

        let mut index = Index::from_records(std::iter::empty(), order);
        for (line_num, line) in raw_lines(reader).enumerate() {
            match line.map_err(|e| BoolmergeError::file_read(path, e))? {
                Ok(line) => index.insert_line(line_num + 1, &line),
                Err(e) => index.skip_line(line_num + 1, e),
            }
        }

        stop_watch.stop();
        info!(
            "Created {:?} index with {} terms from {} in {} seconds",
            order,
            index.len(),
            path.display(),
            stop_watch.elapsed_seconds()?
        );
        if index.skipped_records > 0 {
            warn!(
                "Skipped {} malformed records in {}",
                index.skipped_records,
                path.display()
            );
        }

        Ok(index)
    }

    fn insert_line(&mut self, line_num: usize, line: &str) {
        match parse_record(line) {
            Ok(record) => self.insert(record),
            Err(e) => self.skip_line(line_num, e),
        }
    }

    fn skip_line(&mut self, line_num: usize, error: BoolmergeError) {
        debug!("Skipping index line {line_num}: {error}");
        self.skipped_records += 1;
    }

    fn insert(&mut self, record: IndexRecord) {
        let postings = PostingList::sorted(record.postings, self.order);
        match self.lookup.get(&record.term) {
            Some(&position) => self.terms[position].1 = postings,
            None => {
                self.lookup.insert(record.term.clone(), self.terms.len());
                self.terms.push((record.term, postings));
            }
        }
    }

    /// Ordering policy of every posting list in this index.
    pub fn order(&self) -> PostingOrder {
        self.order
    }

    /// Get the posting list of a term.
    pub fn posting_list(&self, term: &str) -> Option<&PostingList> {
        self.lookup.get(term).map(|&position| &self.terms[position].1)
    }

    /// Check whether a term is indexed.
    pub fn contains_term(&self, term: &str) -> bool {
        self.lookup.contains_key(term)
    }

    /// Posting lists of the query terms that are present, in query order.
    pub fn posting_lists<S: AsRef<str>>(&self, query: &[S]) -> Vec<&PostingList> {
        query
            .iter()
            .filter_map(|term| self.posting_list(term.as_ref()))
            .collect()
    }

    /// Posting lists of every query term, or the first missing term.
    pub fn require_posting_lists<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<&PostingList>> {
        query
            .iter()
            .map(|term| {
                let term = term.as_ref();
                self.posting_list(term)
                    .ok_or_else(|| BoolmergeError::term_not_found(term))
            })
            .collect()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in record order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(term, _)| term.as_str())
    }

    /// Terms and posting lists in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(term, list)| (term.as_str(), list))
    }

    /// Number of malformed records skipped while loading.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::Posting;

    const LINES: [&str; 4] = [
        r"cat\c3\m[5/2, 1/3, 2/1]",
        r"dog\c3\m[9/4, 2/1, 5/1]",
        "garbage line",
        r"eel\c1\m[4/1]",
    ];

    #[test]
    fn test_from_lines_sorts_by_document_id() {
        let index = Index::from_lines(LINES, PostingOrder::DocumentId);

        assert_eq!(index.len(), 3);
        assert_eq!(index.skipped_records(), 1);
        assert_eq!(index.order(), PostingOrder::DocumentId);
        assert_eq!(
            index.posting_list("cat").unwrap().document_ids(),
            vec![1, 2, 5]
        );
        assert_eq!(
            index.posting_list("dog").unwrap().document_ids(),
            vec![2, 5, 9]
        );
    }

    #[test]
    fn test_from_lines_sorts_by_frequency() {
        let index = Index::from_lines(LINES, PostingOrder::Frequency);

        assert_eq!(
            index.posting_list("cat").unwrap().document_ids(),
            vec![1, 5, 2]
        );
        // 2 and 5 share frequency 1 and keep record order.
        assert_eq!(
            index.posting_list("dog").unwrap().document_ids(),
            vec![9, 2, 5]
        );
    }

    #[test]
    fn test_terms_keep_record_order() {
        let index = Index::from_lines(LINES, PostingOrder::DocumentId);
        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["cat", "dog", "eel"]);
    }

    #[test]
    fn test_duplicate_term_replaces_postings_in_place() {
        let records = vec![
            IndexRecord::new("a", "1", vec![Posting::new(1, 1)]),
            IndexRecord::new("b", "1", vec![Posting::new(2, 1)]),
            IndexRecord::new("a", "2", vec![Posting::new(8, 1), Posting::new(3, 1)]),
        ];
        let index = Index::from_records(records, PostingOrder::DocumentId);

        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["a", "b"]);
        assert_eq!(index.posting_list("a").unwrap().document_ids(), vec![3, 8]);
    }

    #[test]
    fn test_posting_list_lookup() {
        let index = Index::from_lines(LINES, PostingOrder::DocumentId);

        assert!(index.contains_term("eel"));
        assert!(!index.contains_term("zzz"));
        assert!(index.posting_list("zzz").is_none());

        let lists = index.posting_lists(&["cat", "zzz", "eel"]);
        assert_eq!(lists.len(), 2);

        let err = index.require_posting_lists(&["cat", "zzz"]).unwrap_err();
        assert!(matches!(err, BoolmergeError::TermNotFound(term) if term == "zzz"));
        assert_eq!(index.require_posting_lists(&["cat", "cat"]).unwrap().len(), 2);
    }

    #[test]
    fn test_open_skips_invalid_utf8_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("term.idx");
        let mut content = br"cat\c3\m[1/3, 2/1, 5/2]".to_vec();
        content.extend_from_slice(b"\ncaf\xe9");
        content.extend_from_slice(br"\c1\m[4/1]");
        content.extend_from_slice(b"\n");
        content.extend_from_slice(br"dog\c3\m[2/1, 5/1, 9/4]");
        content.extend_from_slice(b"\r\n");
        std::fs::write(&path, content).unwrap();

        let index = Index::open(&path, PostingOrder::DocumentId).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.skipped_records(), 1);
        let terms: Vec<&str> = index.terms().collect();
        assert_eq!(terms, vec!["cat", "dog"]);
        assert_eq!(
            index.posting_list("dog").unwrap().document_ids(),
            vec![2, 5, 9]
        );
    }

    #[test]
    fn test_open_missing_file() {
        let err = Index::open("/nonexistent/term.idx", PostingOrder::DocumentId).unwrap_err();
        assert!(matches!(err, BoolmergeError::FileRead { .. }));
    }
}
