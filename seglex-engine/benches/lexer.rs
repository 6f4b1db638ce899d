//! Lexer throughput over growing French documents

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seglex_engine::Lexer;
use std::hint::black_box;

const SENTENCES: &[&str] = &[
    "La mère Michèle a-t-elle perdu son chat?",
    "Ce c'est-à-dire reste, aujourd'hui comme hier.",
    "Fermé jusqu'à demain, peut-être au-delà.",
    "Tout (va-t-il) bien pour M. Dupont et la S.N.C.F. ?",
    "« Quelqu'un viendra », dit-il, parce que c'est l'usage.",
];

fn document_of(sentences: usize) -> String {
    SENTENCES
        .iter()
        .cycle()
        .take(sentences)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_segment_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_by_size");
    let lexer = Lexer::with_dictionary("fr").expect("embedded dictionary compiles");

    for &sentences in &[10usize, 100, 1_000, 10_000] {
        let text = document_of(sentences);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("fr", sentences), &text, |b, text| {
            b.iter(|| {
                let words = lexer.segment(black_box(text)).expect("segmentation succeeds");
                black_box(words)
            });
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_batch");
    let lexer = Lexer::with_dictionary("fr").expect("embedded dictionary compiles");
    let text = document_of(200);

    for &documents in &[1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::new("documents", documents),
            &documents,
            |b, &documents| {
                b.iter(|| {
                    let mut batch: Vec<_> =
                        (0..documents).map(|_| lexer.document(text.as_str())).collect();
                    black_box(lexer.process_batch(&mut batch))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_segment_by_size, bench_batch);
criterion_main!(benches);
