//! Criterion benchmarks for boolmerge.
//!
//! Compares the document-at-a-time merges with the term-at-a-time folds
//! over synthetic posting lists of mixed lengths.

use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use boolmerge::posting::{Posting, PostingList, PostingOrder};
use boolmerge::query::{daat, taat};

/// Generate a posting list of `len` distinct documents.
fn generate_posting_list(rng: &mut StdRng, len: usize, max_doc_id: u64, order: PostingOrder) -> PostingList {
    let mut doc_ids = BTreeSet::new();
    while doc_ids.len() < len {
        doc_ids.insert(rng.random_range(0..max_doc_id));
    }
    let postings = doc_ids
        .into_iter()
        .map(|doc_id| Posting::new(doc_id, rng.random_range(1..50)))
        .collect();
    PostingList::sorted(postings, order)
}

fn generate_query(seed: u64, lengths: &[usize], order: PostingOrder) -> Vec<PostingList> {
    let mut rng = StdRng::seed_from_u64(seed);
    lengths
        .iter()
        .map(|&len| generate_posting_list(&mut rng, len, 20_000, order))
        .collect()
}

fn bench_and(c: &mut Criterion) {
    let mut group = c.benchmark_group("and");

    for lengths in [vec![100, 100], vec![1000, 200, 50], vec![4000, 1000, 10]] {
        let total: usize = lengths.iter().sum();
        let label = format!("{lengths:?}");
        group.throughput(Throughput::Elements(total as u64));

        let by_doc_id = generate_query(42, &lengths, PostingOrder::DocumentId);
        let by_doc_id: Vec<&PostingList> = by_doc_id.iter().collect();
        group.bench_with_input(BenchmarkId::new("daat", &label), &by_doc_id, |b, lists| {
            b.iter(|| black_box(daat::intersect(black_box(lists))))
        });

        let by_frequency = generate_query(42, &lengths, PostingOrder::Frequency);
        let by_frequency: Vec<&PostingList> = by_frequency.iter().collect();
        group.bench_with_input(BenchmarkId::new("taat", &label), &by_frequency, |b, lists| {
            b.iter(|| black_box(taat::fold_and(black_box(lists))))
        });
        group.bench_with_input(
            BenchmarkId::new("taat_shortest_first", &label),
            &by_frequency,
            |b, lists| b.iter(|| black_box(taat::fold_and(&taat::by_length(black_box(lists))))),
        );
    }

    group.finish();
}

fn bench_or(c: &mut Criterion) {
    let mut group = c.benchmark_group("or");

    for lengths in [vec![100, 100], vec![1000, 200, 50]] {
        let total: usize = lengths.iter().sum();
        let label = format!("{lengths:?}");
        group.throughput(Throughput::Elements(total as u64));

        let by_doc_id = generate_query(7, &lengths, PostingOrder::DocumentId);
        let by_doc_id: Vec<&PostingList> = by_doc_id.iter().collect();
        group.bench_with_input(BenchmarkId::new("daat", &label), &by_doc_id, |b, lists| {
            b.iter(|| black_box(daat::union(black_box(lists))))
        });

        let by_frequency = generate_query(7, &lengths, PostingOrder::Frequency);
        let by_frequency: Vec<&PostingList> = by_frequency.iter().collect();
        group.bench_with_input(BenchmarkId::new("taat", &label), &by_frequency, |b, lists| {
            b.iter(|| black_box(taat::fold_or(black_box(lists))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_and, bench_or);
criterion_main!(benches);
