use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use motion_core::{sample, solve_cubic_bezier};
use motion_data::model::Key;

fn bench_sample(c: &mut Criterion) {
    // Typical document curve (3 keys) and a dense synthetic one.
    let fade = vec![
        Key { at: 0.0, value: 1.0 },
        Key { at: 0.5, value: 0.3 },
        Key { at: 1.0, value: 0.0 },
    ];
    let dense: Vec<Key> = (0..=64)
        .map(|i| Key {
            at: i as f32 / 64.0,
            value: (i % 7) as f32,
        })
        .collect();

    c.bench_function("sample_fade_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0_f32;
            for i in 0..=1000 {
                acc += sample(black_box(&fade), i as f32 / 1000.0);
            }
            acc
        })
    });

    c.bench_function("sample_dense_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0_f32;
            for i in 0..=1000 {
                acc += sample(black_box(&dense), i as f32 / 1000.0);
            }
            acc
        })
    });
}

fn bench_bezier(c: &mut Criterion) {
    let p1 = Vec2::new(0.25, 0.4);
    let p2 = Vec2::new(0.25, 1.0);

    c.bench_function("cubic_bezier_sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0_f32;
            for i in 0..=1000 {
                acc += solve_cubic_bezier(black_box(p1), black_box(p2), i as f32 / 1000.0);
            }
            acc
        })
    });
}

criterion_group!(benches, bench_sample, bench_bezier);
criterion_main!(benches);
