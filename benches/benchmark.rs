use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use ordered_trees::{AvlDictionary, AvlTree, Dictionary, SplayDictionary, SplayTree};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("avl_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                let _ = tree.insert(*value);
            }
            tree
        })
    });

    c.bench_function("splay_insert", |b| {
        b.iter(|| {
            let mut tree = SplayTree::new();
            for value in &values {
                let _ = tree.insert(*value);
            }
            tree
        })
    });

    let avl: AvlTree<i32> = values.iter().copied().collect();
    let mut splay: SplayTree<i32> = values.iter().copied().collect();

    c.bench_function("avl_find", |b| {
        b.iter(|| {
            for value in &values {
                let _ = black_box(avl.find(value));
            }
        })
    });

    c.bench_function("splay_find", |b| {
        b.iter(|| {
            for value in &values {
                let _ = black_box(splay.find(value));
            }
        })
    });

    c.bench_function("splay_find_repeated", |b| {
        let hot = &values[..16];
        b.iter(|| {
            for value in hot.iter().cycle().take(N) {
                let _ = black_box(splay.find(value));
            }
        })
    });

    c.bench_function("avl_iter", |b| {
        b.iter(|| {
            for element in &avl {
                black_box(element);
            }
        })
    });

    c.bench_function("dictionary_insert_ascending", |b| {
        b.iter(|| {
            let mut avl = AvlDictionary::<usize, usize>::new();
            let mut splay = SplayDictionary::<usize, usize>::new();
            for key in 0..N {
                let _ = avl.insert(key, key);
                let _ = splay.insert(key, key);
            }
            (avl.len(), splay.len())
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
