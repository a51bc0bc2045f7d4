//! Top-K term selection by posting list length.

use crate::error::{BoolmergeError, Result};
use crate::index::Index;

/// The `k` terms with the longest posting lists.
///
/// Terms are ordered by descending posting list length, ties by ascending
/// byte-wise term order. Every term is returned when `k` exceeds the
/// vocabulary; a negative `k` is an `InvalidArgument` error.
pub fn top_k(index: &Index, k: i64) -> Result<Vec<&str>> {
    if k < 0 {
        return Err(BoolmergeError::invalid_argument(format!(
            "k must not be negative, got {k}"
        )));
    }
    let k = usize::try_from(k).unwrap_or(usize::MAX);

    let mut terms: Vec<(&str, usize)> = index.iter().map(|(term, list)| (term, list.len())).collect();
    terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    terms.truncate(k);

    Ok(terms.into_iter().map(|(term, _)| term).collect())
}
