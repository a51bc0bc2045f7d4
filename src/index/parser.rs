//! Index file record parser.
//!
//! Each line of an index file holds one term:
//!
//! ```text
//! cat\c3\m[1/3, 2/1, 5/2]
//! ```
//!
//! that is the term, the literal separator `\c`, the count field, the literal
//! separator `\m`, and a bracketed list of `documentId/frequency` pairs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{BoolmergeError, Result};
use crate::posting::Posting;

lazy_static! {
    static ref SPLIT_LINE_PATTERN: Regex = Regex::new(r"\\c|\\m").unwrap();
    static ref SPLIT_POSTINGS_PATTERN: Regex = Regex::new(r",\s*").unwrap();
}

/// One decomposed index record, postings in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    /// The indexed term.
    pub term: String,
    /// The count field, carried verbatim and never used by evaluation.
    pub count: String,
    /// Postings as they appear in the record.
    pub postings: Vec<Posting>,
}

impl IndexRecord {
    /// Create a record from its parts.
    pub fn new<T: Into<String>, C: Into<String>>(term: T, count: C, postings: Vec<Posting>) -> Self {
        IndexRecord {
            term: term.into(),
            count: count.into(),
            postings,
        }
    }
}

/// Decompose one line into an [`IndexRecord`].
pub fn parse_record(line: &str) -> Result<IndexRecord> {
    let fields: Vec<&str> = SPLIT_LINE_PATTERN.splitn(line, 3).collect();
    let [term, count, postings] = fields.as_slice() else {
        return Err(BoolmergeError::parse(format!(
            "expected 3 fields, found {}",
            fields.len()
        )));
    };

    let postings = parse_postings(postings.trim_end())?;

    Ok(IndexRecord::new(*term, *count, postings))
}

fn parse_postings(field: &str) -> Result<Vec<Posting>> {
    let inner = field
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| BoolmergeError::parse(format!("postings not bracketed: {field:?}")))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    SPLIT_POSTINGS_PATTERN
        .split(inner)
        .map(|pair| parse_posting(pair.trim()))
        .collect()
}

fn parse_posting(pair: &str) -> Result<Posting> {
    let (doc_id, frequency) = pair
        .split_once('/')
        .ok_or_else(|| BoolmergeError::parse(format!("posting without '/': {pair:?}")))?;

    let doc_id = doc_id
        .parse::<u64>()
        .map_err(|e| BoolmergeError::parse(format!("bad document id {doc_id:?}: {e}")))?;
    let frequency = frequency
        .parse::<u32>()
        .map_err(|e| BoolmergeError::parse(format!("bad frequency {frequency:?}: {e}")))?;

    Ok(Posting::new(doc_id, frequency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = parse_record(r"cat\c3\m[1/3, 2/1, 5/2]").unwrap();
        assert_eq!(record.term, "cat");
        assert_eq!(record.count, "3");
        assert_eq!(
            record.postings,
            vec![Posting::new(1, 3), Posting::new(2, 1), Posting::new(5, 2)]
        );
    }

    #[test]
    fn test_parse_empty_postings() {
        let record = parse_record(r"lonely\c0\m[]").unwrap();
        assert_eq!(record.term, "lonely");
        assert!(record.postings.is_empty());
    }

    #[test]
    fn test_parse_tolerates_trailing_whitespace_and_tight_commas() {
        let record = parse_record("dog\\c2\\m[2/1,9/4]  ").unwrap();
        assert_eq!(record.postings, vec![Posting::new(2, 1), Posting::new(9, 4)]);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(matches!(
            parse_record(r"cat[1/3]"),
            Err(BoolmergeError::Parse(_))
        ));
        assert!(matches!(
            parse_record(r"cat\c3[1/3]"),
            Err(BoolmergeError::Parse(_))
        ));
        assert!(parse_record("").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_postings() {
        assert!(parse_record(r"cat\c1\m1/3").is_err());
        assert!(parse_record(r"cat\c1\m[1-3]").is_err());
        assert!(parse_record(r"cat\c1\m[x/3]").is_err());
        assert!(parse_record(r"cat\c1\m[1/-3]").is_err());
    }

    #[test]
    fn test_only_first_two_separators_split() {
        // A third separator ends up inside the postings field and breaks it.
        assert!(parse_record(r"cat\c1\m[1/3]\m").is_err());
    }
}
