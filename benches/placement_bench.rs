use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use guavahash::{BucketCount, Placement};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = i64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s as i64)
    })
}

fn count(n: i32) -> BucketCount {
    BucketCount::new(n).unwrap()
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("placement_insert_10k", |b| {
        b.iter_batched(
            || Placement::new(count(64)),
            |mut p| {
                for x in lcg(1).take(10_000) {
                    p.insert(x).unwrap();
                }
                black_box(p)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("placement_find_hit", |b| {
        let mut p = Placement::new(count(64));
        let keys: Vec<_> = lcg(7).take(20_000).collect();
        for &k in &keys {
            p.insert(k).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            black_box(p.find(k))
        })
    });
}

// Grow 64 -> 65 buckets over 10k keys; roughly 1/65 of them relocate.
fn bench_resize_grow(c: &mut Criterion) {
    c.bench_function("placement_resize_10k_grow_by_one", |b| {
        b.iter_batched(
            || {
                let mut p = Placement::new(count(64));
                for x in lcg(3).take(10_000) {
                    p.insert(x).unwrap();
                }
                p
            },
            |mut p| black_box(p.resize(count(65))),
            BatchSize::LargeInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_resize_grow
}
criterion_main!(benches);
