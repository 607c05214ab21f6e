use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordle_entropy::{load_dictionary, rank_guesses, CandidateSet, FeedbackMatrix};

fn bench_matrix_build(c: &mut Criterion) {
    let corpus = load_dictionary(5).unwrap();
    c.bench_function("build feedback matrix", |b| {
        b.iter(|| FeedbackMatrix::build(black_box(&corpus)).unwrap())
    });
}

fn bench_rank(c: &mut Criterion) {
    let corpus = load_dictionary(5).unwrap();
    let matrix = FeedbackMatrix::build(&corpus).unwrap();
    let full = CandidateSet::full(corpus.len());
    c.bench_function("rank full corpus", |b| {
        b.iter(|| rank_guesses(&corpus, &matrix, black_box(&full)).unwrap())
    });
}

criterion_group!(benches, bench_matrix_build, bench_rank);
criterion_main!(benches);
