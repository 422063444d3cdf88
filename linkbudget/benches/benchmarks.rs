use criterion::{criterion_group, criterion_main, Criterion};
use linkbudget::{reduce_obstacles, Obstacle};

fn obstacle_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Obstacle reduction");

    let total_km = 40.0;
    let obstacles: Vec<Obstacle> = (1..=64)
        .map(|i| Obstacle::new(f64::from(i) * 0.5, 30.0 + f64::from(i % 7) * 5.0))
        .collect();

    group.bench_with_input("64 obstacles", &(obstacles, total_km), |b, (o, t)| {
        b.iter(|| reduce_obstacles(o, *t))
    });
}

criterion_group!(benches, obstacle_reduction);
criterion_main!(benches);
