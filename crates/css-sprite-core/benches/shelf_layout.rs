use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use css_sprite_core::prelude::*;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn generate_icons(count: usize, min_size: u32, max_size: u32) -> Vec<ImageDescriptor> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            ImageDescriptor::new(format!("icon_{i}"), "png", format!("icon_{i}.png"), Some((w, h)))
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("shelf_layout");
    let constraints = Settings::default().constraints();

    for count in [100, 1_000, 10_000] {
        let icons = generate_icons(count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("pack", count), &icons, |b, icons| {
            b.iter(|| black_box(pack_layout(icons, constraints).height));
        });
    }
    group.finish();
}

fn bench_stylesheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("stylesheet");
    let icons = generate_icons(1_000, 8, 64);
    let layout = pack_layout(&icons, Settings::default().constraints());

    for (label, options) in [
        ("plain", StyleOptions::default()),
        (
            "important_hover",
            StyleOptions {
                important: true,
                hover: true,
            },
        ),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(render(&group_rules("ui", "sprite-ui.png", &layout, options)).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_stylesheet);
criterion_main!(benches);
