use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debt_graph::book::{GraphView, LoanBook};
use debt_graph::optimization::centrality::most_influential;
use debt_graph::optimization::settlement::SettlementEngine;
use debt_graph::simulation::random_network::RandomNetworkConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_book(participants: usize, debts: usize) -> LoanBook {
    let config = RandomNetworkConfig {
        participant_count: participants,
        debt_count: debts,
        ..Default::default()
    };
    let mut book = LoanBook::new();
    book.populate_random(&config, &mut StdRng::seed_from_u64(11))
        .unwrap();
    book
}

fn bench_simplify_5_participants(c: &mut Criterion) {
    let book = random_book(5, 8);
    let raw = book.graph(GraphView::Raw);

    c.bench_function("simplify_5_participants", |b| {
        b.iter(|| SettlementEngine::simplify(black_box(raw)))
    });
}

fn bench_simplify_26_participants(c: &mut Criterion) {
    let book = random_book(26, 200);
    let raw = book.graph(GraphView::Raw);

    c.bench_function("simplify_26_participants", |b| {
        b.iter(|| SettlementEngine::simplify(black_box(raw)))
    });
}

fn bench_centrality_26_participants(c: &mut Criterion) {
    let book = random_book(26, 200);
    let raw = book.graph(GraphView::Raw);

    c.bench_function("centrality_26_participants", |b| {
        b.iter(|| most_influential(black_box(raw)))
    });
}

criterion_group!(
    benches,
    bench_simplify_5_participants,
    bench_simplify_26_participants,
    bench_centrality_26_participants
);
criterion_main!(benches);
