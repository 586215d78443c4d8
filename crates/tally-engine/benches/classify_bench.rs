use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_engine::TallyEngine;
use test_fixtures::{day, known_merchant_transactions, monthly_history, tx};

fn bench_classify(c: &mut Criterion) {
    let mut config = tally_core::config::TallyConfig::default();
    config.engine.classification_memo_capacity = 0;
    let engine = TallyEngine::new(
        config,
        std::sync::Arc::new(tally_storage::InMemoryFeedbackStore::new()),
        None,
    )
    .unwrap();
    let t = tx("b1", "PRLV SEPA SPOTIFY AB 10.99", 10.99)
        .with_history(monthly_history(10.99, 6, day(2024, 6, 15)));

    c.bench_function("classify_single", |b| {
        b.iter(|| engine.classify(black_box(&t)).unwrap())
    });
}

fn bench_fast_batch(c: &mut Criterion) {
    let engine = TallyEngine::in_memory().unwrap();
    let txs = known_merchant_transactions(50);
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("suggest_batch_fast_50", |b| {
        b.to_async(&rt)
            .iter(|| async { engine.suggest_batch(black_box(&txs), false).await.unwrap() })
    });
}

criterion_group!(benches, bench_classify, bench_fast_batch);
criterion_main!(benches);
