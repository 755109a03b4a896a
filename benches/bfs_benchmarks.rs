use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sixdegrees::{
    ActorId, BfsEngine, CountingStore, GraphIndex, MemoryStore, SearchConfig, TieBreak, Title,
};
use std::sync::Arc;

/// Random cast lists: `titles` movies, each crediting `cast` of `actors` people
fn synthetic_store(actors: usize, titles: usize, cast: usize, seed: u64) -> MemoryStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = MemoryStore::new();
    for t in 0..titles {
        let id = format!("tt{:07}", t);
        store.add_title(Title::movie(id.clone(), format!("Movie {}", t)));
        let members: Vec<String> = (0..cast)
            .map(|_| format!("nm{:07}", rng.gen_range(0..actors)))
            .collect();
        store.cast(id, &members[..]);
    }
    store
}

fn actor(i: usize) -> ActorId {
    ActorId::new(format!("nm{:07}", i))
}

/// Benchmark end-to-end search latency as the relation grows
fn bench_search(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("bfs_search");

    for size in [1_000, 10_000, 50_000].iter() {
        let store = Arc::new(synthetic_store(*size, size / 2, 6, 42));
        let engine = BfsEngine::new(store, SearchConfig::default());
        let (start, goal) = (actor(0), actor(size - 1));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.to_async(&rt).iter(|| async {
                let report = engine.search(&start, &goal).await.unwrap();
                criterion::black_box(report.stats.expanded);
            });
        });
    }
    group.finish();
}

/// Benchmark the effect of concurrent co-star fetches
fn bench_fetch_concurrency(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("fetch_concurrency");
    let store = Arc::new(synthetic_store(10_000, 5_000, 6, 7));
    let (start, goal) = (actor(1), actor(9_999));

    for width in [1usize, 4, 16].iter() {
        let config = SearchConfig::default().with_fetch_concurrency(*width);
        let engine = BfsEngine::new(Arc::clone(&store), config);

        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, _| {
            b.to_async(&rt).iter(|| async {
                let report = engine.search(&start, &goal).await.unwrap();
                criterion::black_box(report.stats.discovered);
            });
        });
    }
    group.finish();
}

/// Benchmark lexicographic tie-breaking overhead
fn bench_tie_break(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("tie_break");
    let store = Arc::new(synthetic_store(10_000, 5_000, 6, 11));
    let (start, goal) = (actor(2), actor(7_777));

    for (label, tie_break) in [
        ("store_order", TieBreak::StoreOrder),
        ("lexicographic", TieBreak::Lexicographic),
    ] {
        let engine = BfsEngine::new(
            Arc::clone(&store),
            SearchConfig::default().with_tie_break(tie_break),
        );
        group.bench_function(label, |b| {
            b.to_async(&rt).iter(|| async {
                criterion::black_box(engine.search(&start, &goal).await.unwrap());
            });
        });
    }
    group.finish();
}

/// Round trips per search, reported once rather than timed
fn bench_round_trips(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(CountingStore::new(synthetic_store(10_000, 5_000, 6, 3)));
    let engine = BfsEngine::new(Arc::clone(&store), SearchConfig::default());

    rt.block_on(async {
        engine.search(&actor(0), &actor(5_000)).await.unwrap();
    });
    println!(
        "round trips for one search: {} titles_for, {} co_stars_for",
        store.titles_calls(),
        store.co_star_calls()
    );

    c.bench_function("graph_index_discover", |b| {
        b.iter(|| {
            let mut index = GraphIndex::new(actor(0));
            for i in 1..10_000 {
                index.discover(
                    actor(i),
                    sixdegrees::Edge {
                        title: format!("tt{:07}", i).into(),
                        predecessor: actor(i / 2),
                    },
                );
            }
            criterion::black_box(index.len());
        });
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_fetch_concurrency,
    bench_tie_break,
    bench_round_trips
);
criterion_main!(benches);
