use criterion::{Criterion, criterion_group, criterion_main};
use magic_square::MagicSquare;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    for n in [9usize, 31, 101] {
        c.bench_function(&format!("siamese_{n}"), |b| {
            b.iter(|| {
                let mut sq = MagicSquare::new("ms");
                let grid = sq.generate_odd_square(black_box(n)).map(|g| g.len());
                black_box(grid)
            })
        });
    }
}

fn bench_check(c: &mut Criterion) {
    let sq = MagicSquare::siamese("ms", 101).unwrap();

    c.bench_function("check_ms_101", |b| {
        b.iter(|| {
            let mut sq = sq.clone();
            black_box(sq.check_ms())
        })
    });
}

fn bench_operators(c: &mut Criterion) {
    let a = MagicSquare::siamese("A", 31).unwrap();
    let b = &a >> 3i64;

    let mut group = c.benchmark_group("operators_31x31");
    group.bench_function("add", |bench| bench.iter(|| black_box(&a + &b)));
    group.bench_function("mul", |bench| bench.iter(|| black_box(&a * &b)));
    group.bench_function("div", |bench| bench.iter(|| black_box(&a / &b)));
    group.bench_function("invert", |bench| bench.iter(|| black_box(!&a)));
    group.bench_function("roll", |bench| bench.iter(|| black_box((&a << 5i64) >> 7i64)));
    group.finish();
}

criterion_group!(benches, bench_generate, bench_check, bench_operators);
criterion_main!(benches);
