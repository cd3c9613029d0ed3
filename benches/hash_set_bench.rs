use chained_collections::HashSet;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Ten fixed buckets make every operation linear in len / 10, so sizes
// stay small.
fn bench_insert(c: &mut Criterion) {
    c.bench_function("hash_set_insert_1k", |b| {
        b.iter_batched(
            HashSet::<String>::new,
            |mut s| {
                for x in lcg(1).take(1_000) {
                    s.insert(key(x)).unwrap();
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("hash_set_find_hit", |b| {
        let keys: Vec<_> = lcg(7).take(2_000).map(key).collect();
        let s: HashSet<String> = keys.iter().cloned().collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(s.find(k.as_str()));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("hash_set_find_miss", |b| {
        let s: HashSet<String> = lcg(11).take(1_000).map(key).collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the set
            let k = key(miss.next().unwrap());
            black_box(s.contains(k.as_str()));
        })
    });
}

fn bench_insert_erase(c: &mut Criterion) {
    c.bench_function("hash_set_insert_erase", |b| {
        let mut s: HashSet<u64> = lcg(13).take(1_000).collect();
        let mut fresh = lcg(17);
        b.iter(|| {
            let x = fresh.next().unwrap();
            s.insert(x).unwrap();
            black_box(s.erase(&x));
        })
    });
}

fn bench_walk(c: &mut Criterion) {
    c.bench_function("hash_set_walk_2k", |b| {
        let s: HashSet<u64> = lcg(19).take(2_000).collect();
        b.iter(|| {
            let mut acc = 0u64;
            let mut at = s.begin();
            while let Some(x) = s.get_at(at) {
                acc = acc.wrapping_add(*x);
                at = s.next(at);
            }
            black_box(acc)
        })
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
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_insert_erase, bench_walk
}
criterion_main!(benches);
