// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use scenemap_index::FlatIndex;
use scenemap_treemap::{LayoutConfig, SizeInput, SizeModel, TreemapLayout, to_aabb};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Heavy-tailed sizes, like real scenes: a few huge meshes, many tiny nodes.
fn gen_model(n: usize, seed: u64) -> SizeModel<u32> {
    let mut rng = Rng(seed);
    let sizes: Vec<u64> = (0..n)
        .map(|_| {
            let u = rng.next_f64().max(1e-6);
            (64.0 / u.powf(1.5)) as u64
        })
        .collect();
    SizeModel::build(sizes.iter().enumerate().map(|(i, &byte_size)| SizeInput {
        node: i as u32,
        byte_size,
        node_type: if i % 3 == 0 { "mesh" } else { "transform" },
    }))
}

fn all_items() -> TreemapLayout {
    TreemapLayout::new(LayoutConfig {
        max_items: None,
        min_share: 0.0,
    })
}

fn bench_layout(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 1200.0, 800.0);
    let mut group = c.benchmark_group("layout");
    for &n in &[100_usize, 10_000] {
        let model = gen_model(n, 0xfeed ^ n as u64);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("squarify_n{n}"), |b| {
            b.iter(|| black_box(all_items().layout(black_box(&model), bounds)));
        });
        group.bench_function(format!("squarify_index_n{n}"), |b| {
            b.iter(|| black_box(all_items().layout(&model, bounds).to_index()));
        });
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 1200.0, 800.0);
    let mut group = c.benchmark_group("hit_test");
    for &n in &[100_usize, 10_000] {
        let treemap = all_items().layout(&gen_model(n, 0xbeef ^ n as u64), bounds);
        let strips = treemap.to_index();
        let flat = FlatIndex::from_cells(
            treemap
                .tiles()
                .iter()
                .map(|t| (to_aabb(t.rect), t.node))
                .collect(),
        );
        let mut rng = Rng(42);
        let probes: Vec<(f64, f64)> = (0..1024)
            .map(|_| (rng.next_f64() * 1200.0, rng.next_f64() * 800.0))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("strips_n{n}"), |b| {
            b.iter(|| {
                for &(x, y) in &probes {
                    black_box(strips.hit_test(x, y));
                }
            });
        });
        group.bench_function(format!("flat_n{n}"), |b| {
            b.iter(|| {
                for &(x, y) in &probes {
                    black_box(flat.hit_test(x, y));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_hit);
criterion_main!(benches);
