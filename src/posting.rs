//! Postings and posting lists.
//!
//! A [`PostingList`] is a plain `Vec`-backed sequence of [`Posting`]s for one
//! term. Its order is decided once, when the owning index sorts it under a
//! [`PostingOrder`], and never changes afterwards.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single (document, frequency) occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: u64,
    /// Term frequency in the document.
    pub frequency: u32,
}

impl Posting {
    /// Create a new posting.
    pub fn new(doc_id: u64, frequency: u32) -> Self {
        Posting { doc_id, frequency }
    }

    /// Get the document ID.
    pub fn doc_id(&self) -> u64 {
        self.doc_id
    }

    /// Get the term frequency.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.doc_id, self.frequency)
    }
}

/// Ordering policy applied to every posting list of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingOrder {
    /// Ascending document ID, required by document-at-a-time merges.
    DocumentId,
    /// Descending term frequency. Equal frequencies keep their input order.
    Frequency,
}

impl PostingOrder {
    /// Compare two postings under this policy.
    pub fn compare(&self, a: &Posting, b: &Posting) -> Ordering {
        match self {
            PostingOrder::DocumentId => a.doc_id.cmp(&b.doc_id),
            PostingOrder::Frequency => b.frequency.cmp(&a.frequency),
        }
    }

    /// Sort postings in place. The sort is stable.
    pub fn sort(&self, postings: &mut [Posting]) {
        postings.sort_by(|a, b| self.compare(a, b));
    }

    /// Label used in posting dumps.
    pub fn label(&self) -> &'static str {
        match self {
            PostingOrder::DocumentId => "Ordered by doc IDs",
            PostingOrder::Frequency => "Ordered by TF",
        }
    }
}

/// The ordered postings of a single term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Create an empty posting list with room for `capacity` postings.
    pub fn with_capacity(capacity: usize) -> Self {
        PostingList {
            postings: Vec::with_capacity(capacity),
        }
    }

    /// Wrap postings that are already in the desired order.
    pub fn from_postings(postings: Vec<Posting>) -> Self {
        PostingList { postings }
    }

    /// Sort `postings` under `order` and wrap them.
    pub fn sorted(mut postings: Vec<Posting>, order: PostingOrder) -> Self {
        order.sort(&mut postings);
        PostingList { postings }
    }

    /// Append a posting at the end of the list.
    pub fn push(&mut self, posting: Posting) {
        self.postings.push(posting);
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Alias of [`PostingList::len`].
    pub fn size(&self) -> usize {
        self.postings.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Get the posting at `index`.
    pub fn get(&self, index: usize) -> Option<&Posting> {
        self.postings.get(index)
    }

    /// Get an iterator over the postings.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Borrow the postings as a slice.
    pub fn as_slice(&self) -> &[Posting] {
        &self.postings
    }

    /// Document IDs in list order.
    pub fn document_ids(&self) -> Vec<u64> {
        self.postings.iter().map(|p| p.doc_id).collect()
    }

    /// Linear membership scan for `doc_id`.
    ///
    /// Every element examined adds one to `comparisons`; the scan stops at
    /// the first match.
    pub fn contains_document(&self, doc_id: u64, comparisons: &mut u64) -> bool {
        for posting in &self.postings {
            *comparisons += 1;
            if posting.doc_id == doc_id {
                return true;
            }
        }
        false
    }

    /// Keep only the postings for which `f` returns true.
    pub fn retain<F: FnMut(&Posting) -> bool>(&mut self, f: F) {
        self.postings.retain(f);
    }
}

impl Extend<Posting> for PostingList {
    fn extend<I: IntoIterator<Item = Posting>>(&mut self, iter: I) {
        self.postings.extend(iter);
    }
}

impl FromIterator<Posting> for PostingList {
    fn from_iter<I: IntoIterator<Item = Posting>>(iter: I) -> Self {
        PostingList {
            postings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

impl IntoIterator for PostingList {
    type Item = Posting;
    type IntoIter = std::vec::IntoIter<Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postings() -> Vec<Posting> {
        vec![
            Posting::new(5, 2),
            Posting::new(1, 3),
            Posting::new(9, 2),
            Posting::new(2, 1),
        ]
    }

    #[test]
    fn test_posting_creation() {
        let posting = Posting::new(7, 4);
        assert_eq!(posting.doc_id(), 7);
        assert_eq!(posting.frequency(), 4);
        assert_eq!(posting, Posting { doc_id: 7, frequency: 4 });
        assert_eq!(posting.to_string(), "7/4");
    }

    #[test]
    fn test_sorted_by_document_id() {
        let list = PostingList::sorted(postings(), PostingOrder::DocumentId);
        assert_eq!(list.document_ids(), vec![1, 2, 5, 9]);
    }

    #[test]
    fn test_sorted_by_frequency_is_stable() {
        let list = PostingList::sorted(postings(), PostingOrder::Frequency);
        // 5 and 9 share frequency 2 and keep their input order.
        assert_eq!(list.document_ids(), vec![1, 5, 9, 2]);
    }

    #[test]
    fn test_push_and_access() {
        let mut list = PostingList::new();
        assert!(list.is_empty());

        list.push(Posting::new(3, 1));
        list.push(Posting::new(4, 2));

        assert_eq!(list.len(), 2);
        assert_eq!(list.size(), 2);
        assert_eq!(list.get(1), Some(&Posting::new(4, 2)));
        assert_eq!(list.get(2), None);
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn test_contains_document_counts_examined_elements() {
        let list = PostingList::from_postings(postings());

        let mut comparisons = 0;
        assert!(list.contains_document(9, &mut comparisons));
        assert_eq!(comparisons, 3);

        let mut comparisons = 0;
        assert!(!list.contains_document(42, &mut comparisons));
        assert_eq!(comparisons, 4);

        let mut comparisons = 0;
        assert!(!PostingList::new().contains_document(1, &mut comparisons));
        assert_eq!(comparisons, 0);
    }
}
